pub const PRESET_DEFAULT: &str = r#"[field]
home_country = "BR"
unnumbered_token = "S/N"

[currency]
symbol = "R$"
thousands_separator = "."
decimal_separator = ","

[verification]
cooldown_secs = 60
expiry_secs = 600
max_attempts = 3
auto_submit = false
"#;

pub const PRESET_STRICT: &str = r#"[field]
home_country = "BR"
unnumbered_token = "S/N"

[currency]
symbol = "R$"
thousands_separator = "."
decimal_separator = ","

[verification]
cooldown_secs = 120
expiry_secs = 300
max_attempts = 3
auto_submit = false
"#;

pub const PRESET_DEVELOPMENT: &str = r#"[field]
home_country = "BR"
unnumbered_token = "S/N"

[currency]
symbol = "R$"
thousands_separator = "."
decimal_separator = ","

[verification]
cooldown_secs = 5
expiry_secs = 120
max_attempts = 5
auto_submit = true

[profiles.staging.verification]
cooldown_secs = 30
max_attempts = 3
auto_submit = false
"#;
