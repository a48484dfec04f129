use canon_core::{verify_word_width, CanonError, WORD_BITS};

#[test]
fn matching_width_is_accepted() -> Result<(), CanonError> {
    let width = verify_word_width(WORD_BITS)?;
    assert_eq!(width.bits(), WORD_BITS);
    Ok(())
}

#[test]
fn mismatched_width_is_fatal() {
    let foreign = if WORD_BITS == 64 { 32 } else { 64 };
    let err = verify_word_width(foreign).unwrap_err();
    assert!(matches!(
        err,
        CanonError::WordWidthMismatch(ref info) if info.code == "word-width-mismatch"
    ));
    assert_eq!(
        err.info().context.get("engine_bits"),
        Some(&foreign.to_string())
    );
}
