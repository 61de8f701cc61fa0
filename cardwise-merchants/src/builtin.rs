//! Built-in merchant table.
//!
//! Order matters: keyword lookup returns the first merchant whose keyword
//! matches, so more specific names ("Uber Eats") sit above broader ones
//! ("Uber").

use cardwise_core::SpendingCategory::{self, *};

pub(crate) type BuiltinRow = (&'static str, SpendingCategory, &'static [SpendingCategory], &'static [&'static str]);

pub(crate) const BUILTIN: &[BuiltinRow] = &[
    // grocery and warehouse
    ("Walmart", Grocery, &[Walmart, Other], &["walmart", "wal-mart", "wm supercenter"]),
    ("Target", Grocery, &[Target, Other], &["target"]),
    ("Costco", Wholesale, &[], &["costco", "costco whse"]),
    ("Sam's Club", Wholesale, &[], &["sams club", "sam's club", "samsclub"]),
    ("BJ's Wholesale", Wholesale, &[], &["bj's", "bjs"]),
    ("Kroger", Grocery, &[], &["kroger"]),
    ("Whole Foods", Grocery, &[WholeFoods], &["whole foods", "wholefoods", "wfm"]),
    ("Trader Joe's", Grocery, &[], &["trader joe", "trader joe's", "trader joes"]),
    ("Safeway", Grocery, &[], &["safeway"]),
    ("Publix", Grocery, &[], &["publix"]),
    ("Albertsons", Grocery, &[], &["albertsons"]),
    ("Aldi", Grocery, &[], &["aldi"]),
    ("H-E-B", Grocery, &[], &["heb", "h-e-b"]),
    ("Wegmans", Grocery, &[], &["wegmans"]),
    ("Food Lion", Grocery, &[], &["food lion"]),
    ("Sprouts", Grocery, &[], &["sprouts"]),
    ("Vons", Grocery, &[], &["vons"]),
    ("Harris Teeter", Grocery, &[], &["harris teeter"]),
    ("Stop & Shop", Grocery, &[], &["stop & shop", "stop and shop"]),
    ("Meijer", Grocery, &[], &["meijer"]),
    ("Instacart", Grocery, &[], &["instacart"]),
    // gas and charging
    ("Costco Gas", Gas, &[Wholesale], &["costco gas"]),
    ("Shell", Gas, &[], &["shell"]),
    ("Chevron", Gas, &[], &["chevron"]),
    ("ExxonMobil", Gas, &[], &["exxon", "exxonmobil", "mobil"]),
    ("BP", Gas, &[], &["bp"]),
    ("76", Gas, &[], &["76 gas"]),
    ("Arco", Gas, &[], &["arco"]),
    ("Sunoco", Gas, &[], &["sunoco"]),
    ("Marathon", Gas, &[], &["marathon petro"]),
    ("Wawa", Gas, &[], &["wawa"]),
    ("Sheetz", Gas, &[], &["sheetz"]),
    ("QuikTrip", Gas, &[], &["quiktrip", "qt"]),
    ("Circle K", Gas, &[], &["circle k"]),
    ("7-Eleven", Gas, &[], &["7-eleven", "7 eleven", "7eleven"]),
    ("Speedway", Gas, &[], &["speedway"]),
    ("ChargePoint", Gas, &[EvCharging], &["chargepoint", "ev charging"]),
    ("Tesla Supercharger", Gas, &[EvCharging], &["supercharger", "tesla supercharger"]),
    ("Electrify America", Gas, &[EvCharging], &["electrify america"]),
    // dining
    ("Uber Eats", Dining, &[], &["uber eats", "ubereats"]),
    ("Starbucks", Dining, &[], &["starbucks"]),
    ("McDonald's", Dining, &[], &["mcdonalds", "mcdonald's"]),
    ("Chipotle", Dining, &[], &["chipotle"]),
    ("Chick-fil-A", Dining, &[], &["chick-fil-a", "chickfila"]),
    ("Wendy's", Dining, &[], &["wendys", "wendy's"]),
    ("Burger King", Dining, &[], &["burger king"]),
    ("Taco Bell", Dining, &[], &["taco bell"]),
    ("Subway", Dining, &[], &["subway restaurant"]),
    ("Panda Express", Dining, &[], &["panda express"]),
    ("Five Guys", Dining, &[], &["five guys"]),
    ("In-N-Out", Dining, &[], &["in-n-out", "in n out"]),
    ("Shake Shack", Dining, &[], &["shake shack"]),
    ("Popeyes", Dining, &[], &["popeyes"]),
    ("KFC", Dining, &[], &["kfc", "kentucky fried"]),
    ("Dunkin'", Dining, &[], &["dunkin", "dunkin donuts"]),
    ("Panera Bread", Dining, &[], &["panera"]),
    ("Domino's", Dining, &[], &["dominos", "domino's"]),
    ("Pizza Hut", Dining, &[], &["pizza hut"]),
    ("Papa John's", Dining, &[], &["papa johns", "papa john's"]),
    ("Whataburger", Dining, &[], &["whataburger"]),
    ("Wingstop", Dining, &[], &["wingstop"]),
    ("Buffalo Wild Wings", Dining, &[], &["buffalo wild wings", "bww"]),
    ("Applebee's", Dining, &[], &["applebees", "applebee's"]),
    ("Chili's", Dining, &[], &["chilis", "chili's"]),
    ("Olive Garden", Dining, &[], &["olive garden"]),
    ("Outback Steakhouse", Dining, &[], &["outback"]),
    ("Texas Roadhouse", Dining, &[], &["texas roadhouse"]),
    ("Cheesecake Factory", Dining, &[], &["cheesecake factory"]),
    ("IHOP", Dining, &[], &["ihop"]),
    ("Denny's", Dining, &[], &["dennys", "denny's"]),
    ("Cracker Barrel", Dining, &[], &["cracker barrel"]),
    ("DoorDash", Dining, &[], &["doordash"]),
    ("Grubhub", Dining, &[], &["grubhub"]),
    ("Seamless", Dining, &[], &["seamless"]),
    // streaming
    ("Netflix", Streaming, &[], &["netflix"]),
    ("Spotify", Streaming, &[], &["spotify"]),
    ("Disney+", Streaming, &[], &["disney+", "disney plus"]),
    ("HBO Max", Streaming, &[], &["hbo", "hbo max"]),
    ("YouTube Premium", Streaming, &[], &["youtube"]),
    ("Apple TV+", Streaming, &[Apple], &["apple tv"]),
    ("Amazon Prime Video", Streaming, &[Amazon], &["prime video"]),
    ("Hulu", Streaming, &[], &["hulu"]),
    ("Peacock", Streaming, &[], &["peacock"]),
    ("Paramount+", Streaming, &[], &["paramount+", "paramount plus"]),
    ("Apple Music", Streaming, &[Apple], &["apple music"]),
    ("SiriusXM", Streaming, &[], &["siriusxm", "sirius"]),
    ("Audible", Streaming, &[Amazon], &["audible"]),
    // online shopping
    ("Amazon", Amazon, &[OnlineShopping], &["amazon", "amzn"]),
    ("eBay", OnlineShopping, &[], &["ebay"]),
    ("Etsy", OnlineShopping, &[], &["etsy"]),
    ("Wayfair", OnlineShopping, &[], &["wayfair"]),
    ("Newegg", OnlineShopping, &[Electronics], &["newegg"]),
    ("Best Buy", OnlineShopping, &[Electronics], &["best buy", "bestbuy"]),
    ("Apple Store", OnlineShopping, &[Apple, Electronics], &["apple store", "apple.com"]),
    ("Nike", OnlineShopping, &[], &["nike"]),
    ("Zappos", OnlineShopping, &[], &["zappos"]),
    ("Nordstrom", OnlineShopping, &[Nordstrom], &["nordstrom"]),
    ("Macy's", OnlineShopping, &[Macys], &["macys", "macy's"]),
    ("Kohl's", OnlineShopping, &[Kohls], &["kohls", "kohl's"]),
    ("Gap", OnlineShopping, &[Gap], &["gap", "old navy", "banana republic"]),
    ("SHEIN", OnlineShopping, &[], &["shein"]),
    ("Temu", OnlineShopping, &[], &["temu"]),
    ("Chewy", OnlineShopping, &[], &["chewy"]),
    // travel
    ("United Airlines", Travel, &[], &["united airlines", "united air"]),
    ("Delta", Travel, &[], &["delta air", "delta"]),
    ("American Airlines", Travel, &[], &["american airlines", "american air"]),
    ("Southwest", Travel, &[], &["southwest"]),
    ("JetBlue", Travel, &[], &["jetblue"]),
    ("Alaska Airlines", Travel, &[], &["alaska airlines", "alaska air"]),
    ("Spirit Airlines", Travel, &[], &["spirit airlines"]),
    ("Frontier Airlines", Travel, &[], &["frontier airlines"]),
    ("Airbnb", Travel, &[], &["airbnb"]),
    ("Marriott", Travel, &[], &["marriott"]),
    ("Hilton", Travel, &[], &["hilton"]),
    ("Hyatt", Travel, &[], &["hyatt"]),
    ("IHG", Travel, &[], &["ihg", "holiday inn"]),
    ("Best Western", Travel, &[], &["best western"]),
    ("VRBO", Travel, &[], &["vrbo"]),
    ("Booking.com", Travel, &[], &["booking.com"]),
    ("Expedia", Travel, &[], &["expedia"]),
    ("Hotels.com", Travel, &[], &["hotels.com"]),
    ("Priceline", Travel, &[], &["priceline"]),
    ("Enterprise", Travel, &[], &["enterprise rent"]),
    ("Hertz", Travel, &[], &["hertz"]),
    ("Avis", Travel, &[], &["avis"]),
    ("Turo", Travel, &[], &["turo"]),
    // transit
    ("Uber", Transit, &[], &["uber", "uber trip"]),
    ("Lyft", Transit, &[], &["lyft"]),
    ("BART", Transit, &[], &["bart"]),
    ("MTA", Transit, &[], &["mta", "nyct"]),
    ("Amtrak", Transit, &[], &["amtrak"]),
    // drugstore
    ("CVS", Drugstore, &[], &["cvs", "cvs pharmacy"]),
    ("Walgreens", Drugstore, &[], &["walgreens"]),
    ("Rite Aid", Drugstore, &[], &["rite aid"]),
    ("Duane Reade", Drugstore, &[], &["duane reade"]),
    // home improvement
    ("Home Depot", HomeImprovement, &[], &["home depot", "homedepot"]),
    ("Lowe's", HomeImprovement, &[], &["lowes", "lowe's"]),
    ("Menards", HomeImprovement, &[], &["menards"]),
    ("Ace Hardware", HomeImprovement, &[], &["ace hardware"]),
    // entertainment
    ("AMC Theatres", Entertainment, &[], &["amc", "amc theatres"]),
    ("Regal Cinemas", Entertainment, &[], &["regal"]),
    ("Cinemark", Entertainment, &[], &["cinemark"]),
    ("Dave & Buster's", Entertainment, &[], &["dave and busters", "dave & buster's"]),
    ("Topgolf", Entertainment, &[], &["topgolf"]),
    ("Six Flags", Entertainment, &[], &["six flags"]),
    ("Ticketmaster", Entertainment, &[], &["ticketmaster"]),
    ("StubHub", Entertainment, &[], &["stubhub"]),
    // paypal
    ("PayPal", Paypal, &[], &["paypal"]),
    ("Venmo", Paypal, &[], &["venmo"]),
    // phone, internet and utilities
    ("AT&T", Utilities, &[Phone, Internet], &["at&t", "att"]),
    ("Verizon", Utilities, &[Phone, Internet], &["verizon", "vzwrlss"]),
    ("T-Mobile", Utilities, &[Phone], &["t-mobile", "tmobile"]),
    ("Comcast", Utilities, &[Internet], &["comcast", "xfinity"]),
    ("Spectrum", Utilities, &[Internet], &["spectrum"]),
    // business
    ("UPS", Shipping, &[], &["ups store", "the ups store"]),
    ("FedEx", Shipping, &[], &["fedex"]),
    ("USPS", Shipping, &[], &["usps"]),
    ("Google Ads", Advertising, &[], &["google ads"]),
    ("Meta Ads", Advertising, &[], &["facebk", "meta ads"]),
    ("Staples", OfficeSupplies, &[], &["staples"]),
    ("Office Depot", OfficeSupplies, &[], &["office depot", "officemax"]),
    // fitness
    ("Planet Fitness", Fitness, &[], &["planet fitness"]),
    ("LA Fitness", Fitness, &[], &["la fitness"]),
    ("Equinox", Fitness, &[], &["equinox"]),
    ("Orangetheory", Fitness, &[], &["orangetheory"]),
    ("Peloton", Fitness, &[], &["peloton"]),
    // everything else
    ("PetSmart", Other, &[], &["petsmart"]),
    ("Petco", Other, &[], &["petco"]),
];
