#[test]
fn test() {
    let max = numcvt::from_str::<u64>("18446744073709551615");
    assert_eq!(max.unwrap(), u64::MAX);
    let x = numcvt::from_str::<u64>("18446744073709551616");
    assert!(x.unwrap_err().is_data());
    let x = numcvt::from_str::<u64>("184467440737095516150");
    assert!(x.unwrap_err().is_data());
}
