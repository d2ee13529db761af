//! Static destination metadata used for suggestion enrichment.
//!
//! Covers the common short-haul destinations the inspiration search
//! returns. A miss is not an error: the suggestion ships with the bare
//! IATA code and no city/country fields.

/// City and country metadata for a destination code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DestinationInfo {
    pub city: &'static str,
    pub country: &'static str,
    pub country_code: &'static str,
}

const fn info(
    city: &'static str,
    country: &'static str,
    country_code: &'static str,
) -> DestinationInfo {
    DestinationInfo {
        city,
        country,
        country_code,
    }
}

/// Sorted by code for binary search.
const DESTINATIONS: &[(&str, DestinationInfo)] = &[
    ("ACE", info("Lanzarote", "Spain", "ES")),
    ("AGP", info("Malaga", "Spain", "ES")),
    ("ALC", info("Alicante", "Spain", "ES")),
    ("AMS", info("Amsterdam", "Netherlands", "NL")),
    ("ARN", info("Stockholm", "Sweden", "SE")),
    ("ATH", info("Athens", "Greece", "GR")),
    ("AYT", info("Antalya", "Turkey", "TR")),
    ("BCN", info("Barcelona", "Spain", "ES")),
    ("BER", info("Berlin", "Germany", "DE")),
    ("BIO", info("Bilbao", "Spain", "ES")),
    ("BJV", info("Bodrum", "Turkey", "TR")),
    ("BLQ", info("Bologna", "Italy", "IT")),
    ("BOD", info("Bordeaux", "France", "FR")),
    ("BRU", info("Brussels", "Belgium", "BE")),
    ("BUD", info("Budapest", "Hungary", "HU")),
    ("CDG", info("Paris", "France", "FR")),
    ("CFU", info("Corfu", "Greece", "GR")),
    ("CGN", info("Cologne", "Germany", "DE")),
    ("CMN", info("Casablanca", "Morocco", "MA")),
    ("CPH", info("Copenhagen", "Denmark", "DK")),
    ("CRL", info("Brussels Charleroi", "Belgium", "BE")),
    ("CTA", info("Catania", "Italy", "IT")),
    ("DBV", info("Dubrovnik", "Croatia", "HR")),
    ("DLM", info("Dalaman", "Turkey", "TR")),
    ("DUB", info("Dublin", "Ireland", "IE")),
    ("DUS", info("Dusseldorf", "Germany", "DE")),
    ("EIN", info("Eindhoven", "Netherlands", "NL")),
    ("FAO", info("Faro", "Portugal", "PT")),
    ("FCO", info("Rome", "Italy", "IT")),
    ("FLR", info("Florence", "Italy", "IT")),
    ("FNC", info("Funchal", "Portugal", "PT")),
    ("FRA", info("Frankfurt", "Germany", "DE")),
    ("FUE", info("Fuerteventura", "Spain", "ES")),
    ("GDN", info("Gdansk", "Poland", "PL")),
    ("GIB", info("Gibraltar", "Gibraltar", "GI")),
    ("GVA", info("Geneva", "Switzerland", "CH")),
    ("HAM", info("Hamburg", "Germany", "DE")),
    ("HEL", info("Helsinki", "Finland", "FI")),
    ("HER", info("Heraklion", "Greece", "GR")),
    ("IBZ", info("Ibiza", "Spain", "ES")),
    ("IST", info("Istanbul", "Turkey", "TR")),
    ("JMK", info("Mykonos", "Greece", "GR")),
    ("JTR", info("Santorini", "Greece", "GR")),
    ("KEF", info("Reykjavik", "Iceland", "IS")),
    ("KRK", info("Krakow", "Poland", "PL")),
    ("LCA", info("Larnaca", "Cyprus", "CY")),
    ("LIN", info("Milan Linate", "Italy", "IT")),
    ("LIS", info("Lisbon", "Portugal", "PT")),
    ("LPA", info("Gran Canaria", "Spain", "ES")),
    ("LYS", info("Lyon", "France", "FR")),
    ("MAD", info("Madrid", "Spain", "ES")),
    ("MLA", info("Malta", "Malta", "MT")),
    ("MRS", info("Marseille", "France", "FR")),
    ("MUC", info("Munich", "Germany", "DE")),
    ("MXP", info("Milan Malpensa", "Italy", "IT")),
    ("NAP", info("Naples", "Italy", "IT")),
    ("NCE", info("Nice", "France", "FR")),
    ("OPO", info("Porto", "Portugal", "PT")),
    ("ORK", info("Cork", "Ireland", "IE")),
    ("ORY", info("Paris Orly", "France", "FR")),
    ("OSL", info("Oslo", "Norway", "NO")),
    ("PFO", info("Paphos", "Cyprus", "CY")),
    ("PMI", info("Palma de Mallorca", "Spain", "ES")),
    ("PMO", info("Palermo", "Italy", "IT")),
    ("PRG", info("Prague", "Czech Republic", "CZ")),
    ("PSA", info("Pisa", "Italy", "IT")),
    ("RAK", info("Marrakech", "Morocco", "MA")),
    ("RHO", info("Rhodes", "Greece", "GR")),
    ("RIX", info("Riga", "Latvia", "LV")),
    ("RTM", info("Rotterdam", "Netherlands", "NL")),
    ("SAW", info("Istanbul Sabiha", "Turkey", "TR")),
    ("SKG", info("Thessaloniki", "Greece", "GR")),
    ("SNN", info("Shannon", "Ireland", "IE")),
    ("SPU", info("Split", "Croatia", "HR")),
    ("STR", info("Stuttgart", "Germany", "DE")),
    ("SVQ", info("Seville", "Spain", "ES")),
    ("SZG", info("Salzburg", "Austria", "AT")),
    ("TFS", info("Tenerife South", "Spain", "ES")),
    ("TGD", info("Podgorica", "Montenegro", "ME")),
    ("TIV", info("Tivat", "Montenegro", "ME")),
    ("TLL", info("Tallinn", "Estonia", "EE")),
    ("TLS", info("Toulouse", "France", "FR")),
    ("VCE", info("Venice", "Italy", "IT")),
    ("VIE", info("Vienna", "Austria", "AT")),
    ("VLC", info("Valencia", "Spain", "ES")),
    ("VNO", info("Vilnius", "Lithuania", "LT")),
    ("WAW", info("Warsaw", "Poland", "PL")),
    ("ZAG", info("Zagreb", "Croatia", "HR")),
    ("ZRH", info("Zurich", "Switzerland", "CH")),
];

/// Case-insensitive metadata lookup for a destination code.
pub fn destination_info(code: &str) -> Option<&'static DestinationInfo> {
    let needle = code.trim().to_ascii_uppercase();
    DESTINATIONS
        .binary_search_by(|probe| probe.0.cmp(needle.as_str()))
        .ok()
        .map(|index| &DESTINATIONS[index].1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        let hit = destination_info("bcn").expect("BCN is in the catalog");
        assert_eq!(hit.city, "Barcelona");
        assert_eq!(hit.country, "Spain");
        assert_eq!(hit.country_code, "ES");
    }

    #[test]
    fn unknown_code_misses() {
        assert!(destination_info("XXX").is_none());
        assert!(destination_info("").is_none());
    }

    #[test]
    fn table_is_sorted_for_binary_search() {
        let codes: Vec<&str> = DESTINATIONS.iter().map(|entry| entry.0).collect();
        let mut sorted = codes.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(codes, sorted);
    }
}
