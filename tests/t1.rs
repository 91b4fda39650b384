use anyhow::Result;
use zachlisp::read::{read_all, write_all};
use zachlisp::settings::{DEFAULT_FORMAT, DEFAULT_MODES};

const INPUT: &[u8] = include_bytes!("t-input.zl");
const EXPECTED: &[u8] = include_bytes!("t-expected.zl");

#[test]
fn t1() -> Result<()> {
    let forms = read_all(INPUT, &DEFAULT_MODES)?;
    let mut out = Vec::<u8>::new();
    write_all(&mut out, &forms, &DEFAULT_FORMAT)?;
    assert_eq!(String::from_utf8(out)?, String::from_utf8(EXPECTED.to_vec())?);
    Ok(())
}
