#![no_main]

use libfuzzer_sys::fuzz_target;
use mascara::domain::{MaskKind, ValidationKind};
use mascara::engine::{apply_mask, detect_brand, validate, FieldContext};

fuzz_target!(|data: &[u8]| {
    // Split the input into a previous value and an edit, then run every
    // mask and every validator over the result.
    if let Ok(text) = std::str::from_utf8(data) {
        let mid = (text.len() / 2..=text.len())
            .find(|&i| text.is_char_boundary(i))
            .unwrap_or(text.len());
        let (previous, edit) = text.split_at(mid);
        let ctx = FieldContext::default();
        for kind in MaskKind::ALL {
            let once = apply_mask(previous, edit, kind, &ctx);
            assert_eq!(apply_mask(&once, &once, kind, &ctx), once);
        }
        for kind in ValidationKind::ALL {
            let _ = validate(edit, kind, &ctx);
        }
        let _ = detect_brand(edit);
    }
});
