#![no_main]

use libfuzzer_sys::fuzz_target;
use berdec::{unmarshal, unmarshal_reader, ErrorKind};

macro_rules! decode_builtin {
    ( $data:expr, $type:ident ) => {{
        let mut wide = 0i64;
        let wide_res = unmarshal($data, &mut wide);
        let mut value: $type = 0;
        match unmarshal($data, &mut value) {
            Ok(()) => assert_eq!(i64::from(value), wide),
            Err(err) => {
                assert_eq!(value, 0);
                if wide_res.is_ok() {
                    assert_eq!(err.kind(), Some(ErrorKind::ValueTooLarge));
                }
            }
        }
    }}
}

fuzz_target!(|data: &[u8]| {
    decode_builtin!(data, i8);
    decode_builtin!(data, i16);
    decode_builtin!(data, i32);
    decode_builtin!(data, i64);

    let mut slice_value = 0i64;
    let mut reader_value = 0i64;
    let slice_res = unmarshal(data, &mut slice_value);
    let reader_res = unmarshal_reader(data, &mut reader_value);
    assert_eq!(slice_res.is_ok(), reader_res.is_ok());
    assert_eq!(slice_value, reader_value);
});
