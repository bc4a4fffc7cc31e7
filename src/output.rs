//! Text serialization of a [`ScalarField`].
//!
//! One value per line in vertex order, scientific notation with 18 fractional
//! digits. That is more than the 17 significant digits an `f64` needs, so
//! finite values parse back bit-identical.

use std::fs::{self, File};
use std::io::{BufRead, BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::F;
use crate::error::{FieldError, Result};
use crate::field::ScalarField;

/// Write `field` to `w`, one `\n`-terminated value per line.
pub fn write_field<W: Write>(field: &ScalarField, w: W) -> Result<()> {
    let mut w = BufWriter::new(w);
    for v in field.values() {
        writeln!(w, "{v:.18e}")?;
    }
    w.flush()?;
    Ok(())
}

/// Serialize `field` into an in-memory buffer.
pub fn to_bytes(field: &ScalarField) -> Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(field.len() * 26);
    write_field(field, &mut buf)?;
    Ok(buf)
}

/// Write `field` to `path`.
///
/// Data goes to a sibling `.tmp` file that is renamed over `path` once
/// complete, so a failed write never leaves a truncated field behind.
pub fn save_field(field: &ScalarField, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");

    let res = File::create(&tmp)
        .map_err(FieldError::from)
        .and_then(|f| write_field(field, f))
        .and_then(|()| fs::rename(&tmp, path).map_err(FieldError::from));
    if res.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    res?;

    debug!(path = %path.display(), values = field.len(), "wrote scalar field");
    Ok(())
}

/// Parse a field written by [`write_field`]. Blank lines are skipped.
pub fn parse_field<R: BufRead>(r: R) -> Result<ScalarField> {
    let mut values = vec![];
    for (i, line) in r.lines().enumerate() {
        let line = line?;
        let s = line.trim();
        if s.is_empty() {
            continue;
        }
        let v: F = s.parse().map_err(|_| FieldError::Parse {
            line: i + 1,
            value: s.to_string(),
        })?;
        values.push(v);
    }
    Ok(ScalarField::from_values(values))
}

/// Read a field from `path`.
pub fn load_field(path: impl AsRef<Path>) -> Result<ScalarField> {
    let f = File::open(path)?;
    parse_field(std::io::BufReader::new(f))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_is_fixed() {
        let field = ScalarField::from_values(vec![0., 1.5, -2.]);
        let text = String::from_utf8(to_bytes(&field).unwrap()).unwrap();
        assert_eq!(
            text,
            "0.000000000000000000e0\n1.500000000000000000e0\n-2.000000000000000000e0\n"
        );
    }

    #[test]
    fn test_round_trip_exact() {
        let vals = vec![0.1, -1.0 / 3.0, 2.0 * 0.3_f64.sin(), 1e-300, -7.25e12, F::MAX];
        let field = ScalarField::from_values(vals.clone());
        let back = parse_field(&to_bytes(&field).unwrap()[..]).unwrap();
        assert_eq!(back.values(), &vals[..]);
    }

    #[test]
    fn test_sentinels_round_trip() {
        let field = ScalarField::from_values(vec![F::NAN, F::INFINITY, F::NEG_INFINITY]);
        let bytes = to_bytes(&field).unwrap();
        assert_eq!(bytes, b"NaN\ninf\n-inf\n");

        let back = parse_field(&bytes[..]).unwrap();
        assert!(back.values()[0].is_nan());
        assert_eq!(back.values()[1], F::INFINITY);
        assert_eq!(back.values()[2], F::NEG_INFINITY);
    }

    #[test]
    fn test_deterministic() {
        let field = ScalarField::from_values(vec![0.123, 4.56, 7.89]);
        assert_eq!(to_bytes(&field).unwrap(), to_bytes(&field).unwrap());
    }

    #[test]
    fn test_parse_error_line() {
        let err = parse_field(&b"1.0\n\nabc\n"[..]).unwrap_err();
        assert!(matches!(err, FieldError::Parse { line: 3, .. }));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("field.csv");
        let field = ScalarField::from_values(vec![1.0, 2.0, 3.0]);

        save_field(&field, &path).unwrap();
        assert!(!dir.path().join("field.csv.tmp").exists());
        assert_eq!(load_field(&path).unwrap(), field);
    }

    #[test]
    fn test_save_into_missing_dir_leaves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("field.csv");
        let field = ScalarField::from_values(vec![1.0]);

        assert!(matches!(save_field(&field, &path), Err(FieldError::Io(_))));
        assert!(!path.exists());
    }
}
