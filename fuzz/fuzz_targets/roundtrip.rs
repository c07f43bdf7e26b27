#![no_main]

use libfuzzer_sys::fuzz_target;
use numcvt::{Base, FloatStyle, FmtState};

fuzz_target!(|input: (u64, u8)| {
    let (bits, flags) = input;
    let value = f64::from_bits(bits);

    let text = numcvt::to_string(&value, &FmtState::new());
    let back = numcvt::from_str::<f64>(&text).unwrap();
    assert!(back.to_bits() == bits || (value.is_nan() && back.is_nan()));

    let style = match flags % 3 {
        0 => FloatStyle::General,
        1 => FloatStyle::Fixed,
        _ => FloatStyle::Scientific,
    };
    let fmt = FmtState::new()
        .style(style)
        .precision(Some(u32::from(flags >> 2)))
        .width(usize::from(flags & 0x3F));
    let _ = numcvt::to_string(&value, &fmt);

    let int = bits as i64;
    let hex = FmtState::new().base(Base::Hex);
    assert_eq!(numcvt::to_string(&int, &hex), format!("{:x}", int));
    assert_eq!(numcvt::from_str::<i64>(&numcvt::to_string(&int, &FmtState::new())).unwrap(), int);
});
