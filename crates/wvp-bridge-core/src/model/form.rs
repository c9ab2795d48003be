use std::str::FromStr;

use crate::error::CoreError;

/// Which configuration form the host is asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormType {
    /// `CFG` -- per-device configuration form.
    Config,
    /// `VCR` -- per-device voucher form.
    Voucher,
    /// `SVCR` -- service voucher form, served from a JSON file.
    ServiceVoucher,
}

impl FromStr for FormType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CFG" => Ok(Self::Config),
            "VCR" => Ok(Self::Voucher),
            "SVCR" => Ok(Self::ServiceVoucher),
            other => Err(CoreError::UnsupportedFormType {
                form_type: other.to_owned(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_codes() {
        for (code, ft) in [
            ("CFG", FormType::Config),
            ("VCR", FormType::Voucher),
            ("SVCR", FormType::ServiceVoucher),
        ] {
            assert_eq!(code.parse::<FormType>().ok(), Some(ft));
        }
    }

    #[test]
    fn codes_are_case_sensitive() {
        assert!(matches!(
            "vcr".parse::<FormType>(),
            Err(CoreError::UnsupportedFormType { .. })
        ));
    }
}
