#![no_main]
use libfuzzer_sys::fuzz_target;
use numcvt::Convert;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let (_, len) = f64::parse(s);
        assert!(len <= s.len());
        let _ = numcvt::from_str::<f32>(s);
        let _ = numcvt::from_str::<i64>(s);
        let _ = numcvt::from_str::<u8>(s);
    }
});
