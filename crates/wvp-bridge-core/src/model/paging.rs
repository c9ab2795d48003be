/// Page selection for the device-list callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub page_size: u32,
}

impl PageRequest {
    pub const DEFAULT_PAGE: u32 = 1;
    pub const DEFAULT_PAGE_SIZE: u32 = 10;

    /// Build from raw form values. Absent, empty, `"0"` or non-numeric
    /// values fall back to page 1 / size 10.
    pub fn from_params(page: Option<&str>, page_size: Option<&str>) -> Self {
        Self {
            page: parse_positive(page).unwrap_or(Self::DEFAULT_PAGE),
            page_size: parse_positive(page_size).unwrap_or(Self::DEFAULT_PAGE_SIZE),
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: Self::DEFAULT_PAGE,
            page_size: Self::DEFAULT_PAGE_SIZE,
        }
    }
}

fn parse_positive(raw: Option<&str>) -> Option<u32> {
    raw.map(str::trim)
        .and_then(|s| s.parse::<u32>().ok())
        .filter(|n| *n > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_empty_and_zero_use_defaults() {
        let expected = PageRequest::default();
        assert_eq!(PageRequest::from_params(None, None), expected);
        assert_eq!(PageRequest::from_params(Some(""), Some("")), expected);
        assert_eq!(PageRequest::from_params(Some("0"), Some("0")), expected);
        assert_eq!(PageRequest::from_params(Some("1"), Some("10")), expected);
    }

    #[test]
    fn explicit_values_are_kept() {
        let req = PageRequest::from_params(Some("3"), Some(" 25 "));
        assert_eq!(req.page, 3);
        assert_eq!(req.page_size, 25);
    }

    #[test]
    fn garbage_falls_back() {
        let req = PageRequest::from_params(Some("-1"), Some("lots"));
        assert_eq!(req, PageRequest::default());
    }
}
