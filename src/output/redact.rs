#[derive(Debug, Clone)]
pub struct RedactionConfig {
    pub enabled: bool,
    pub visible_chars: usize,
}

impl Default for RedactionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            visible_chars: 4,
        }
    }
}

/// Hide every digit except the trailing `visible_chars`, keeping the
/// separators so a masked card still reads as a card.
#[must_use]
pub fn redact_digits(value: &str, config: &RedactionConfig) -> String {
    if !config.enabled {
        return value.to_string();
    }

    let total = value.chars().filter(char::is_ascii_digit).count();
    let hidden = total.saturating_sub(config.visible_chars);
    let mut seen = 0;
    value
        .chars()
        .map(|c| {
            if c.is_ascii_digit() {
                seen += 1;
                if seen <= hidden {
                    return '*';
                }
            }
            c
        })
        .collect()
}

/// Email addresses keep their first character and domain; anything else is
/// treated as a phone number.
#[must_use]
pub fn redact_address(address: &str, config: &RedactionConfig) -> String {
    if !config.enabled {
        return address.to_string();
    }

    match address.split_once('@') {
        Some((local, domain)) => {
            let first = local.chars().next().map(String::from).unwrap_or_default();
            format!("{first}***@{domain}")
        }
        None => redact_digits(address, config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redaction_disabled_passes_through() {
        let config = RedactionConfig {
            enabled: false,
            visible_chars: 4,
        };
        assert_eq!(
            redact_digits("4111 1111 1111 1111", &config),
            "4111 1111 1111 1111"
        );
        assert_eq!(
            redact_address("ana@clinica.com.br", &config),
            "ana@clinica.com.br"
        );
    }

    #[test]
    fn test_redact_digits_keeps_layout() {
        let config = RedactionConfig::default();
        assert_eq!(
            redact_digits("4111 1111 1111 1234", &config),
            "**** **** **** 1234"
        );
        assert_eq!(redact_digits("123", &config), "123");
    }

    #[test]
    fn test_redact_address_email() {
        let config = RedactionConfig::default();
        assert_eq!(
            redact_address("ana.souza@clinica.com.br", &config),
            "a***@clinica.com.br"
        );
        assert_eq!(redact_address("@x.io", &config), "***@x.io");
    }

    #[test]
    fn test_redact_address_phone() {
        let config = RedactionConfig::default();
        assert_eq!(
            redact_address("+55 (11) 98765-4321", &config),
            "+** (**) *****-4321"
        );
    }
}
