use crate::domain::CountryPhoneProfile;

/// Phone profiles in display order. The first entry is the home country.
pub static COUNTRIES: &[CountryPhoneProfile] = &[
    CountryPhoneProfile {
        iso_code: "BR",
        display_name: "Brasil",
        flag: "🇧🇷",
        dial_code: "+55",
        template: "(••) •••••-••••",
        short_template: Some("(••) ••••-••••"),
    },
    CountryPhoneProfile {
        iso_code: "AR",
        display_name: "Argentina",
        flag: "🇦🇷",
        dial_code: "+54",
        template: "•• ••••-••••",
        short_template: None,
    },
    CountryPhoneProfile {
        iso_code: "CL",
        display_name: "Chile",
        flag: "🇨🇱",
        dial_code: "+56",
        template: "• •••• ••••",
        short_template: None,
    },
    CountryPhoneProfile {
        iso_code: "CO",
        display_name: "Colombia",
        flag: "🇨🇴",
        dial_code: "+57",
        template: "••• ••• ••••",
        short_template: None,
    },
    CountryPhoneProfile {
        iso_code: "MX",
        display_name: "México",
        flag: "🇲🇽",
        dial_code: "+52",
        template: "•• •••• ••••",
        short_template: None,
    },
    CountryPhoneProfile {
        iso_code: "PY",
        display_name: "Paraguay",
        flag: "🇵🇾",
        dial_code: "+595",
        template: "••• ••• •••",
        short_template: None,
    },
    CountryPhoneProfile {
        iso_code: "UY",
        display_name: "Uruguay",
        flag: "🇺🇾",
        dial_code: "+598",
        template: "•• ••• •••",
        short_template: None,
    },
    CountryPhoneProfile {
        iso_code: "US",
        display_name: "United States",
        flag: "🇺🇸",
        dial_code: "+1",
        template: "(•••) •••-••••",
        short_template: None,
    },
    CountryPhoneProfile {
        iso_code: "CA",
        display_name: "Canada",
        flag: "🇨🇦",
        dial_code: "+1",
        template: "(•••) •••-••••",
        short_template: None,
    },
    CountryPhoneProfile {
        iso_code: "PT",
        display_name: "Portugal",
        flag: "🇵🇹",
        dial_code: "+351",
        template: "••• ••• •••",
        short_template: None,
    },
    CountryPhoneProfile {
        iso_code: "ES",
        display_name: "España",
        flag: "🇪🇸",
        dial_code: "+34",
        template: "••• •• •• ••",
        short_template: None,
    },
    CountryPhoneProfile {
        iso_code: "FR",
        display_name: "France",
        flag: "🇫🇷",
        dial_code: "+33",
        template: "• •• •• •• ••",
        short_template: None,
    },
    CountryPhoneProfile {
        iso_code: "IT",
        display_name: "Italia",
        flag: "🇮🇹",
        dial_code: "+39",
        template: "••• ••• ••••",
        short_template: None,
    },
    CountryPhoneProfile {
        iso_code: "DE",
        display_name: "Deutschland",
        flag: "🇩🇪",
        dial_code: "+49",
        template: "•••• •••••••",
        short_template: None,
    },
    CountryPhoneProfile {
        iso_code: "GB",
        display_name: "United Kingdom",
        flag: "🇬🇧",
        dial_code: "+44",
        template: "•••• ••••••",
        short_template: None,
    },
];

/// Brazilian area codes (DDD). Any other two-digit prefix is rejected for
/// home-country numbers.
static AREA_CODES: &[u32] = &[
    11, 12, 13, 14, 15, 16, 17, 18, 19, // São Paulo
    21, 22, 24, 27, 28, // Rio de Janeiro, Espírito Santo
    31, 32, 33, 34, 35, 37, 38, // Minas Gerais
    41, 42, 43, 44, 45, 46, 47, 48, 49, // Paraná, Santa Catarina
    51, 53, 54, 55, // Rio Grande do Sul
    61, 62, 63, 64, 65, 66, 67, 68, 69, // Centro-Oeste, Tocantins, Acre, Rondônia
    71, 73, 74, 75, 77, 79, // Bahia, Sergipe
    81, 82, 83, 84, 85, 86, 87, 88, 89, // Nordeste
    91, 92, 93, 94, 95, 96, 97, 98, 99, // Norte, Maranhão
];

#[must_use]
pub fn home_country() -> &'static CountryPhoneProfile {
    &COUNTRIES[0]
}

#[must_use]
pub fn find_country(iso_code: &str) -> Option<&'static CountryPhoneProfile> {
    let wanted = iso_code.trim();
    COUNTRIES
        .iter()
        .find(|c| c.iso_code.eq_ignore_ascii_case(wanted))
}

#[must_use]
pub fn is_valid_area_code(code: u32) -> bool {
    AREA_CODES.contains(&code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_home_country_is_brazil() {
        assert_eq!(home_country().iso_code, "BR");
        assert_eq!(home_country().capacity(), 11);
    }

    #[test]
    fn test_find_country_is_case_insensitive() {
        assert_eq!(find_country("pt").map(|c| c.dial_code), Some("+351"));
        assert_eq!(find_country(" US ").map(|c| c.iso_code), Some("US"));
        assert!(find_country("XX").is_none());
    }

    #[test]
    fn test_iso_codes_are_unique() {
        let codes: HashSet<_> = COUNTRIES.iter().map(|c| c.iso_code).collect();
        assert_eq!(codes.len(), COUNTRIES.len());
    }

    #[test]
    fn test_every_template_fits_coarse_phone_range() {
        for country in COUNTRIES {
            let capacity = country.capacity();
            assert!(
                (7..=15).contains(&capacity),
                "{} template holds {capacity} digits",
                country.iso_code
            );
        }
    }

    #[test]
    fn test_area_codes() {
        assert!(is_valid_area_code(11));
        assert!(is_valid_area_code(99));
        assert!(!is_valid_area_code(10));
        assert!(!is_valid_area_code(20));
        assert!(!is_valid_area_code(23));
    }
}
