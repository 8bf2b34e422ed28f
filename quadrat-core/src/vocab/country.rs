//! ISO 3166-1 countries and the text parser that maps published country
//! values onto them.

use super::normalize;
use crate::types::ParseOutcome;
use crate::QuadratError;
use once_cell::sync::Lazy;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// A country identified by its ISO 3166-1 alpha-2 code
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Country([u8; 2]);

/// (alpha-2, alpha-3, English title)
const COUNTRIES: &[(&str, &str, &str)] = &[
    ("AD", "AND", "Andorra"),
    ("AE", "ARE", "United Arab Emirates"),
    ("AF", "AFG", "Afghanistan"),
    ("AG", "ATG", "Antigua and Barbuda"),
    ("AI", "AIA", "Anguilla"),
    ("AL", "ALB", "Albania"),
    ("AM", "ARM", "Armenia"),
    ("AO", "AGO", "Angola"),
    ("AQ", "ATA", "Antarctica"),
    ("AR", "ARG", "Argentina"),
    ("AS", "ASM", "American Samoa"),
    ("AT", "AUT", "Austria"),
    ("AU", "AUS", "Australia"),
    ("AW", "ABW", "Aruba"),
    ("AX", "ALA", "Åland Islands"),
    ("AZ", "AZE", "Azerbaijan"),
    ("BA", "BIH", "Bosnia and Herzegovina"),
    ("BB", "BRB", "Barbados"),
    ("BD", "BGD", "Bangladesh"),
    ("BE", "BEL", "Belgium"),
    ("BF", "BFA", "Burkina Faso"),
    ("BG", "BGR", "Bulgaria"),
    ("BH", "BHR", "Bahrain"),
    ("BI", "BDI", "Burundi"),
    ("BJ", "BEN", "Benin"),
    ("BL", "BLM", "Saint Barthélemy"),
    ("BM", "BMU", "Bermuda"),
    ("BN", "BRN", "Brunei Darussalam"),
    ("BO", "BOL", "Bolivia"),
    ("BQ", "BES", "Bonaire, Sint Eustatius and Saba"),
    ("BR", "BRA", "Brazil"),
    ("BS", "BHS", "Bahamas"),
    ("BT", "BTN", "Bhutan"),
    ("BV", "BVT", "Bouvet Island"),
    ("BW", "BWA", "Botswana"),
    ("BY", "BLR", "Belarus"),
    ("BZ", "BLZ", "Belize"),
    ("CA", "CAN", "Canada"),
    ("CC", "CCK", "Cocos (Keeling) Islands"),
    ("CD", "COD", "Democratic Republic of the Congo"),
    ("CF", "CAF", "Central African Republic"),
    ("CG", "COG", "Congo"),
    ("CH", "CHE", "Switzerland"),
    ("CI", "CIV", "Côte d'Ivoire"),
    ("CK", "COK", "Cook Islands"),
    ("CL", "CHL", "Chile"),
    ("CM", "CMR", "Cameroon"),
    ("CN", "CHN", "China"),
    ("CO", "COL", "Colombia"),
    ("CR", "CRI", "Costa Rica"),
    ("CU", "CUB", "Cuba"),
    ("CV", "CPV", "Cape Verde"),
    ("CW", "CUW", "Curaçao"),
    ("CX", "CXR", "Christmas Island"),
    ("CY", "CYP", "Cyprus"),
    ("CZ", "CZE", "Czech Republic"),
    ("DE", "DEU", "Germany"),
    ("DJ", "DJI", "Djibouti"),
    ("DK", "DNK", "Denmark"),
    ("DM", "DMA", "Dominica"),
    ("DO", "DOM", "Dominican Republic"),
    ("DZ", "DZA", "Algeria"),
    ("EC", "ECU", "Ecuador"),
    ("EE", "EST", "Estonia"),
    ("EG", "EGY", "Egypt"),
    ("EH", "ESH", "Western Sahara"),
    ("ER", "ERI", "Eritrea"),
    ("ES", "ESP", "Spain"),
    ("ET", "ETH", "Ethiopia"),
    ("FI", "FIN", "Finland"),
    ("FJ", "FJI", "Fiji"),
    ("FK", "FLK", "Falkland Islands"),
    ("FM", "FSM", "Micronesia"),
    ("FO", "FRO", "Faroe Islands"),
    ("FR", "FRA", "France"),
    ("GA", "GAB", "Gabon"),
    ("GB", "GBR", "United Kingdom"),
    ("GD", "GRD", "Grenada"),
    ("GE", "GEO", "Georgia"),
    ("GF", "GUF", "French Guiana"),
    ("GG", "GGY", "Guernsey"),
    ("GH", "GHA", "Ghana"),
    ("GI", "GIB", "Gibraltar"),
    ("GL", "GRL", "Greenland"),
    ("GM", "GMB", "Gambia"),
    ("GN", "GIN", "Guinea"),
    ("GP", "GLP", "Guadeloupe"),
    ("GQ", "GNQ", "Equatorial Guinea"),
    ("GR", "GRC", "Greece"),
    ("GS", "SGS", "South Georgia and the South Sandwich Islands"),
    ("GT", "GTM", "Guatemala"),
    ("GU", "GUM", "Guam"),
    ("GW", "GNB", "Guinea-Bissau"),
    ("GY", "GUY", "Guyana"),
    ("HK", "HKG", "Hong Kong"),
    ("HM", "HMD", "Heard Island and McDonald Islands"),
    ("HN", "HND", "Honduras"),
    ("HR", "HRV", "Croatia"),
    ("HT", "HTI", "Haiti"),
    ("HU", "HUN", "Hungary"),
    ("ID", "IDN", "Indonesia"),
    ("IE", "IRL", "Ireland"),
    ("IL", "ISR", "Israel"),
    ("IM", "IMN", "Isle of Man"),
    ("IN", "IND", "India"),
    ("IO", "IOT", "British Indian Ocean Territory"),
    ("IQ", "IRQ", "Iraq"),
    ("IR", "IRN", "Iran"),
    ("IS", "ISL", "Iceland"),
    ("IT", "ITA", "Italy"),
    ("JE", "JEY", "Jersey"),
    ("JM", "JAM", "Jamaica"),
    ("JO", "JOR", "Jordan"),
    ("JP", "JPN", "Japan"),
    ("KE", "KEN", "Kenya"),
    ("KG", "KGZ", "Kyrgyzstan"),
    ("KH", "KHM", "Cambodia"),
    ("KI", "KIR", "Kiribati"),
    ("KM", "COM", "Comoros"),
    ("KN", "KNA", "Saint Kitts and Nevis"),
    ("KP", "PRK", "North Korea"),
    ("KR", "KOR", "South Korea"),
    ("KW", "KWT", "Kuwait"),
    ("KY", "CYM", "Cayman Islands"),
    ("KZ", "KAZ", "Kazakhstan"),
    ("LA", "LAO", "Laos"),
    ("LB", "LBN", "Lebanon"),
    ("LC", "LCA", "Saint Lucia"),
    ("LI", "LIE", "Liechtenstein"),
    ("LK", "LKA", "Sri Lanka"),
    ("LR", "LBR", "Liberia"),
    ("LS", "LSO", "Lesotho"),
    ("LT", "LTU", "Lithuania"),
    ("LU", "LUX", "Luxembourg"),
    ("LV", "LVA", "Latvia"),
    ("LY", "LBY", "Libya"),
    ("MA", "MAR", "Morocco"),
    ("MC", "MCO", "Monaco"),
    ("MD", "MDA", "Moldova"),
    ("ME", "MNE", "Montenegro"),
    ("MF", "MAF", "Saint Martin (French part)"),
    ("MG", "MDG", "Madagascar"),
    ("MH", "MHL", "Marshall Islands"),
    ("MK", "MKD", "North Macedonia"),
    ("ML", "MLI", "Mali"),
    ("MM", "MMR", "Myanmar"),
    ("MN", "MNG", "Mongolia"),
    ("MO", "MAC", "Macao"),
    ("MP", "MNP", "Northern Mariana Islands"),
    ("MQ", "MTQ", "Martinique"),
    ("MR", "MRT", "Mauritania"),
    ("MS", "MSR", "Montserrat"),
    ("MT", "MLT", "Malta"),
    ("MU", "MUS", "Mauritius"),
    ("MV", "MDV", "Maldives"),
    ("MW", "MWI", "Malawi"),
    ("MX", "MEX", "Mexico"),
    ("MY", "MYS", "Malaysia"),
    ("MZ", "MOZ", "Mozambique"),
    ("NA", "NAM", "Namibia"),
    ("NC", "NCL", "New Caledonia"),
    ("NE", "NER", "Niger"),
    ("NF", "NFK", "Norfolk Island"),
    ("NG", "NGA", "Nigeria"),
    ("NI", "NIC", "Nicaragua"),
    ("NL", "NLD", "Netherlands"),
    ("NO", "NOR", "Norway"),
    ("NP", "NPL", "Nepal"),
    ("NR", "NRU", "Nauru"),
    ("NU", "NIU", "Niue"),
    ("NZ", "NZL", "New Zealand"),
    ("OM", "OMN", "Oman"),
    ("PA", "PAN", "Panama"),
    ("PE", "PER", "Peru"),
    ("PF", "PYF", "French Polynesia"),
    ("PG", "PNG", "Papua New Guinea"),
    ("PH", "PHL", "Philippines"),
    ("PK", "PAK", "Pakistan"),
    ("PL", "POL", "Poland"),
    ("PM", "SPM", "Saint Pierre and Miquelon"),
    ("PN", "PCN", "Pitcairn"),
    ("PR", "PRI", "Puerto Rico"),
    ("PS", "PSE", "Palestine"),
    ("PT", "PRT", "Portugal"),
    ("PW", "PLW", "Palau"),
    ("PY", "PRY", "Paraguay"),
    ("QA", "QAT", "Qatar"),
    ("RE", "REU", "Réunion"),
    ("RO", "ROU", "Romania"),
    ("RS", "SRB", "Serbia"),
    ("RU", "RUS", "Russian Federation"),
    ("RW", "RWA", "Rwanda"),
    ("SA", "SAU", "Saudi Arabia"),
    ("SB", "SLB", "Solomon Islands"),
    ("SC", "SYC", "Seychelles"),
    ("SD", "SDN", "Sudan"),
    ("SE", "SWE", "Sweden"),
    ("SG", "SGP", "Singapore"),
    ("SH", "SHN", "Saint Helena, Ascension and Tristan da Cunha"),
    ("SI", "SVN", "Slovenia"),
    ("SJ", "SJM", "Svalbard and Jan Mayen"),
    ("SK", "SVK", "Slovakia"),
    ("SL", "SLE", "Sierra Leone"),
    ("SM", "SMR", "San Marino"),
    ("SN", "SEN", "Senegal"),
    ("SO", "SOM", "Somalia"),
    ("SR", "SUR", "Suriname"),
    ("SS", "SSD", "South Sudan"),
    ("ST", "STP", "Sao Tome and Principe"),
    ("SV", "SLV", "El Salvador"),
    ("SX", "SXM", "Sint Maarten (Dutch part)"),
    ("SY", "SYR", "Syria"),
    ("SZ", "SWZ", "Eswatini"),
    ("TC", "TCA", "Turks and Caicos Islands"),
    ("TD", "TCD", "Chad"),
    ("TF", "ATF", "French Southern Territories"),
    ("TG", "TGO", "Togo"),
    ("TH", "THA", "Thailand"),
    ("TJ", "TJK", "Tajikistan"),
    ("TK", "TKL", "Tokelau"),
    ("TL", "TLS", "Timor-Leste"),
    ("TM", "TKM", "Turkmenistan"),
    ("TN", "TUN", "Tunisia"),
    ("TO", "TON", "Tonga"),
    ("TR", "TUR", "Turkey"),
    ("TT", "TTO", "Trinidad and Tobago"),
    ("TV", "TUV", "Tuvalu"),
    ("TW", "TWN", "Taiwan"),
    ("TZ", "TZA", "Tanzania"),
    ("UA", "UKR", "Ukraine"),
    ("UG", "UGA", "Uganda"),
    ("UM", "UMI", "United States Minor Outlying Islands"),
    ("US", "USA", "United States"),
    ("UY", "URY", "Uruguay"),
    ("UZ", "UZB", "Uzbekistan"),
    ("VA", "VAT", "Vatican City"),
    ("VC", "VCT", "Saint Vincent and the Grenadines"),
    ("VE", "VEN", "Venezuela"),
    ("VG", "VGB", "British Virgin Islands"),
    ("VI", "VIR", "U.S. Virgin Islands"),
    ("VN", "VNM", "Vietnam"),
    ("VU", "VUT", "Vanuatu"),
    ("WF", "WLF", "Wallis and Futuna"),
    ("WS", "WSM", "Samoa"),
    ("XK", "XKX", "Kosovo"),
    ("YE", "YEM", "Yemen"),
    ("YT", "MYT", "Mayotte"),
    ("ZA", "ZAF", "South Africa"),
    ("ZM", "ZMB", "Zambia"),
    ("ZW", "ZWE", "Zimbabwe"),
    // withdrawn codes still found in legacy data
    ("AN", "ANT", "Netherlands Antilles"),
    ("BU", "BUR", "Burma"),
    ("CS", "SCG", "Serbia and Montenegro"),
    ("DD", "DDR", "German Democratic Republic"),
    ("FX", "FXX", "Metropolitan France"),
    ("SU", "SUN", "Soviet Union"),
    ("TP", "TMP", "East Timor"),
    ("YU", "YUG", "Yugoslavia"),
    ("ZR", "ZAR", "Zaire"),
];

/// Withdrawn code and its successor
const PREFERRED: &[(&str, &str)] = &[
    ("AN", "CW"),
    ("BU", "MM"),
    ("CS", "RS"),
    ("DD", "DE"),
    ("FX", "FR"),
    ("SU", "RU"),
    ("TP", "TL"),
    ("YU", "RS"),
    ("ZR", "CD"),
];

/// State and territory (or neighbour) pairs that publishers commonly
/// conflate; symmetric
const CONFUSED: &[(&str, &str)] = &[
    ("IE", "GB"),
    ("GB", "IM"),
    ("GB", "JE"),
    ("GB", "GG"),
    ("FR", "RE"),
    ("FR", "GP"),
    ("FR", "MQ"),
    ("FR", "GF"),
    ("FR", "YT"),
    ("FR", "NC"),
    ("FR", "PF"),
    ("FR", "PM"),
    ("FR", "BL"),
    ("FR", "MF"),
    ("NL", "AW"),
    ("NL", "CW"),
    ("NL", "SX"),
    ("NL", "BQ"),
    ("US", "PR"),
    ("US", "VI"),
    ("US", "GU"),
    ("US", "AS"),
    ("US", "MP"),
    ("DK", "GL"),
    ("DK", "FO"),
    ("NO", "SJ"),
    ("FI", "AX"),
    ("AU", "CX"),
    ("AU", "CC"),
    ("AU", "NF"),
    ("NZ", "CK"),
    ("NZ", "NU"),
    ("NZ", "TK"),
    ("CN", "HK"),
    ("CN", "MO"),
];

/// Informal names and common misspellings
const ALIASES: &[(&str, &str)] = &[
    ("uk", "GB"),
    ("great britain", "GB"),
    ("britain", "GB"),
    ("england", "GB"),
    ("scotland", "GB"),
    ("wales", "GB"),
    ("northern ireland", "GB"),
    ("united kingdom of great britain and northern ireland", "GB"),
    ("usa", "US"),
    ("us", "US"),
    ("united states of america", "US"),
    ("america", "US"),
    ("holland", "NL"),
    ("the netherlands", "NL"),
    ("deutschland", "DE"),
    ("danmark", "DK"),
    ("sverige", "SE"),
    ("norge", "NO"),
    ("suomi", "FI"),
    ("espana", "ES"),
    ("brasil", "BR"),
    ("mexique", "MX"),
    ("ivory coast", "CI"),
    ("cote divoire", "CI"),
    ("russia", "RU"),
    ("czechia", "CZ"),
    ("swaziland", "SZ"),
    ("macedonia", "MK"),
    ("vatican", "VA"),
    ("holy see", "VA"),
    ("republic of korea", "KR"),
    ("korea", "KR"),
    ("dprk", "KP"),
    ("viet nam", "VN"),
    ("lao pdr", "LA"),
    ("syrian arab republic", "SY"),
    ("iran islamic republic of", "IR"),
    ("bolivia plurinational state of", "BO"),
    ("venezuela bolivarian republic of", "VE"),
    ("tanzania united republic of", "TZ"),
    ("moldova republic of", "MD"),
    ("drc", "CD"),
    ("dr congo", "CD"),
    ("congo kinshasa", "CD"),
    ("congo brazzaville", "CG"),
    ("republic of the congo", "CG"),
    ("cabo verde", "CV"),
    ("federated states of micronesia", "FM"),
    ("reunion", "RE"),
    ("curacao", "CW"),
];

/// Normalised code, title or alias → country, plus whether the match was exact
static INDEX: Lazy<HashMap<String, (Country, bool)>> = Lazy::new(|| {
    let mut index = HashMap::new();
    for (alpha2, alpha3, title) in COUNTRIES {
        let country = Country::from_code_unchecked(alpha2);
        index.insert(normalize(alpha2), (country, true));
        index.insert(normalize(alpha3), (country, true));
        index.insert(normalize(title), (country, true));
    }
    for (alias, code) in ALIASES {
        index
            .entry(normalize(alias))
            .or_insert((Country::from_code_unchecked(code), false));
    }
    index
});

impl Country {
    pub const CANADA: Country = Country(*b"CA");
    pub const DENMARK: Country = Country(*b"DK");
    pub const FRANCE: Country = Country(*b"FR");
    pub const GERMANY: Country = Country(*b"DE");
    pub const IRELAND: Country = Country(*b"IE");
    pub const ISLE_OF_MAN: Country = Country(*b"IM");
    pub const SWEDEN: Country = Country(*b"SE");
    pub const UNITED_KINGDOM: Country = Country(*b"GB");
    pub const UNITED_STATES: Country = Country(*b"US");
    pub const AUSTRALIA: Country = Country(*b"AU");
    pub const NETHERLANDS: Country = Country(*b"NL");

    fn from_code_unchecked(code: &str) -> Country {
        let bytes = code.as_bytes();
        Country([bytes[0], bytes[1]])
    }

    fn entry(&self) -> Option<&'static (&'static str, &'static str, &'static str)> {
        COUNTRIES.iter().find(|(alpha2, _, _)| alpha2.as_bytes() == self.0)
    }

    /// Strict lookup by alpha-2 code, case-insensitive
    pub fn from_iso_code(code: &str) -> Option<Country> {
        let upper = code.trim().to_ascii_uppercase();
        COUNTRIES
            .iter()
            .find(|(alpha2, _, _)| *alpha2 == upper)
            .map(|(alpha2, _, _)| Country::from_code_unchecked(alpha2))
    }

    /// Parse free text: codes and titles are definite, aliases probable.
    /// Unknown text fails without issues; callers decide what that means.
    pub fn parse(text: &str) -> ParseOutcome<Country> {
        let key = normalize(text);
        if key.is_empty() {
            return ParseOutcome::fail();
        }
        match INDEX.get(&key) {
            Some((country, true)) => ParseOutcome::success(*country),
            Some((country, false)) => ParseOutcome::probable(*country),
            None => ParseOutcome::fail(),
        }
    }

    pub fn iso2(&self) -> &str {
        // The table only holds ASCII codes
        std::str::from_utf8(&self.0).unwrap_or("??")
    }

    pub fn iso3(&self) -> &'static str {
        self.entry().map(|e| e.1).unwrap_or("")
    }

    pub fn title(&self) -> &'static str {
        self.entry().map(|e| e.2).unwrap_or("")
    }

    /// Canonical form for storage: withdrawn codes become their successor
    pub fn preferred(self) -> Country {
        PREFERRED
            .iter()
            .find(|(old, _)| old.as_bytes() == self.0)
            .map(|(_, new)| Country::from_code_unchecked(new))
            .unwrap_or(self)
    }

    pub fn is_confused_with(&self, other: Country) -> bool {
        let (a, b) = (self.iso2(), other.iso2());
        CONFUSED
            .iter()
            .any(|(x, y)| (*x == a && *y == b) || (*x == b && *y == a))
    }
}

impl fmt::Debug for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Country({})", self.iso2())
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.iso2())
    }
}

impl FromStr for Country {
    type Err = QuadratError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Country::parse(s)
            .into_payload()
            .ok_or_else(|| QuadratError::Parse(format!("Unknown country: {}", s)))
    }
}

impl Serialize for Country {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.iso2())
    }
}

impl<'de> Deserialize<'de> for Country {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        Country::from_iso_code(&code)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown country code {}", code)))
    }
}
