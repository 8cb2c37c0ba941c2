use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        OverlayError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        OverlayError::out_of_range("x")
            .to_string()
            .contains("out of range:")
    );
    assert!(
        OverlayError::geometry("x")
            .to_string()
            .contains("invalid geometry:")
    );
    assert_eq!(
        OverlayError::format(7, "bad row").to_string(),
        "format error at line 7: bad row"
    );
}

#[test]
fn dimension_mismatch_names_both_counts() {
    let err = OverlayError::DimensionMismatch {
        expected: 3,
        found: 2,
    };
    assert_eq!(
        err.to_string(),
        "dimension mismatch: expected 3 axes, found 2"
    );
}

#[test]
fn line_is_only_reported_for_format_errors() {
    assert_eq!(OverlayError::format(12, "x").line(), Some(12));
    assert_eq!(OverlayError::validation("x").line(), None);
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = OverlayError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
