use numcvt::Convert;

#[test]
fn test() {
    // 1 + 2^-53, the midpoint between 1 and the next double, written out
    // in full. Anything past the last digit decides the direction.
    let midpoint = "1.00000000000000011102230246251565404236316680908203125";
    assert_eq!(f64::parse(midpoint).0, 1.0);
    let above = format!("{}{}1", midpoint, "0".repeat(200));
    assert_eq!(f64::parse(&above).0, 1.0000000000000002);
    let below = "1.00000000000000011102230246251565404236316680908203124999";
    assert_eq!(f64::parse(below).0, 1.0);
}
