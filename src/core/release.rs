use crate::domain::model::ReleaseFile;
use crate::utils::error::Result;
use crate::utils::validation::validate_version;

impl ReleaseFile {
    /// `3.116.0` → `nss_3_116.rst`, `3.116.1` → `nss_3_116_1.rst`.
    ///
    /// A trailing `.0` is dropped only when the version has more than two
    /// parts, so `3.0` stays `nss_3_0.rst`.
    pub fn from_version(version: &str) -> Result<Self> {
        let version = version.trim();
        validate_version("release", version)?;

        let mut parts: Vec<&str> = version.split('.').collect();
        if parts.len() > 2 && parts.last() == Some(&"0") {
            parts.pop();
        }

        Ok(Self::from_index_entry(format!("nss_{}.rst", parts.join("_"))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_zero_is_dropped() {
        let release = ReleaseFile::from_version("3.116.0").unwrap();
        assert_eq!(release.name(), "nss_3_116.rst");
        assert_eq!(release.title(), "nss_3_116");
    }

    #[test]
    fn test_point_release_is_kept() {
        let release = ReleaseFile::from_version("3.116.1").unwrap();
        assert_eq!(release.name(), "nss_3_116_1.rst");
    }

    #[test]
    fn test_two_part_versions() {
        assert_eq!(
            ReleaseFile::from_version("3.16").unwrap().name(),
            "nss_3_16.rst"
        );
        assert_eq!(
            ReleaseFile::from_version("3.0").unwrap().name(),
            "nss_3_0.rst"
        );
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        assert_eq!(
            ReleaseFile::from_version(" 3.90.2 ").unwrap().name(),
            "nss_3_90_2.rst"
        );
    }

    #[test]
    fn test_invalid_versions_are_rejected() {
        assert!(ReleaseFile::from_version("").is_err());
        assert!(ReleaseFile::from_version("latest").is_err());
        assert!(ReleaseFile::from_version("3.116.x").is_err());
    }

    #[test]
    fn test_index_entry_without_suffix() {
        let release = ReleaseFile::from_index_entry("nss_3_117");
        assert_eq!(release.title(), "nss_3_117");
    }
}
