use numcvt::Convert;

#[test]
fn test() {
    assert_eq!(f64::parse("1e99999999999999999999").0, f64::INFINITY);
    assert_eq!(f64::parse("1e-99999999999999999999").0, 0.0);
    assert_eq!(f64::parse("0e99999999999999999999").0, 0.0);
    // many leading zeros pull a huge exponent back into range
    let text = format!("0.{}1e400", "0".repeat(399));
    assert_eq!(f64::parse(&text).0, 1.0);
}
