pub mod brands;
mod checksum;
pub mod context;
mod controller;
pub mod countries;
mod flow;
mod mask;
mod validate;
mod verification;

pub use brands::{detect_brand, find_rule, BRAND_RULES};
pub use checksum::{check_cnpj, check_cpf, validate_cnpj, validate_cpf};
pub use context::{FieldContext, DEFAULT_UNNUMBERED_TOKEN};
pub use controller::FieldController;
pub use countries::{find_country, home_country, is_valid_area_code, COUNTRIES};
pub use flow::{CodeDelivery, Clock, ManualClock, PendingTimer, SystemClock, VerificationFlow};
pub use mask::{apply_mask, fill_template, unmask};
pub use validate::{card_metadata, phone_metadata, validate};
pub use verification::{generate_code, VerificationSession};
