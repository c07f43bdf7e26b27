use numcvt::{Convert, FloatStyle, FmtState};

#[test]
fn test() {
    // The smallest subnormal sits on a rounding boundary that the fast
    // path cannot settle.
    let text = numcvt::to_string(&5e-324f64, &FmtState::new());
    assert_eq!(text, "5e-324");
    assert_eq!(numcvt::from_str::<f64>(&text).unwrap(), 5e-324);

    let text = numcvt::to_string(&9007199254740992.0f64, &FmtState::new());
    assert_eq!(text, "9007199254740992");
}

#[test]
fn test_tie_goes_to_even_digit() {
    // 519570.12 and 519570.13 both read back as 519570.125; the even last
    // digit wins.
    let text = numcvt::to_string(&519570.125f32, &FmtState::new());
    assert_eq!(text, "519570.12");
    assert_eq!(f32::parse(&text).0, 519570.125);

    let sci = FmtState::new().style(FloatStyle::Scientific);
    assert_eq!(numcvt::to_string(&519570.125f32, &sci), "5.1957012e+05");
}
