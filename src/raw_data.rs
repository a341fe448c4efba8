use serde::{Deserialize, Serialize};

use crate::hex_code::HexCode;

/// Smallest buffer the game ever offers.
pub const MIN_BUFFER_SIZE: usize = 4;
/// Largest buffer the game ever offers.
pub const MAX_BUFFER_SIZE: usize = 9;

/// Everything recognized from one breach protocol screen.
///
/// The solver trusts this data: `grid` holds a square number of codes and
/// `buffer_size` lies within [`MIN_BUFFER_SIZE`]`..=`[`MAX_BUFFER_SIZE`]. Callers
/// which build it from untrusted input can check with [`validate`][Self::validate].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreachProtocolRawData {
    /// Codes in row-major order, top left first.
    pub grid: Vec<HexCode>,
    pub daemons: Vec<Vec<HexCode>>,
    pub buffer_size: usize,
    /// Recognized type of each daemon, parallel to `daemons`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<String>>,
}

impl BreachProtocolRawData {
    pub fn new(grid: Vec<HexCode>, daemons: Vec<Vec<HexCode>>, buffer_size: usize) -> Self {
        Self {
            grid,
            daemons,
            buffer_size,
            types: None,
        }
    }

    pub fn with_types(mut self, types: Vec<String>) -> Self {
        self.types = Some(types);
        self
    }

    /// Side length of the square grid.
    pub fn size(&self) -> usize {
        integer_sqrt(self.grid.len())
    }

    pub fn validate(&self) -> Result<(), Error> {
        let size = self.size();
        if size * size != self.grid.len() {
            return Err(Error::NotSquare(self.grid.len()));
        }
        if !(MIN_BUFFER_SIZE..=MAX_BUFFER_SIZE).contains(&self.buffer_size) {
            return Err(Error::BufferSize(self.buffer_size));
        }
        if let Some(index) = self.daemons.iter().position(Vec::is_empty) {
            return Err(Error::EmptyDaemon(index));
        }
        if let Some(types) = &self.types {
            if types.len() != self.daemons.len() {
                return Err(Error::TypesLength {
                    types: types.len(),
                    daemons: self.daemons.len(),
                });
            }
        }
        Ok(())
    }
}

fn integer_sqrt(n: usize) -> usize {
    let mut root = (n as f64).sqrt() as usize;
    while root * root > n {
        root -= 1;
    }
    while (root + 1) * (root + 1) <= n {
        root += 1;
    }
    root
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("grid of {0} codes is not square")]
    NotSquare(usize),
    #[error("buffer size {0} is outside 4..=9")]
    BufferSize(usize),
    #[error("daemon {0} has no codes")]
    EmptyDaemon(usize),
    #[error("{types} daemon types given for {daemons} daemons")]
    TypesLength { types: usize, daemons: usize },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hex_code::parse_codes;
    use rstest::rstest;

    fn raw(grid: &str, buffer_size: usize) -> BreachProtocolRawData {
        BreachProtocolRawData::new(
            parse_codes(grid).unwrap(),
            vec![parse_codes("1C 55").unwrap()],
            buffer_size,
        )
    }

    #[rstest]
    #[case(4, 2)]
    #[case(9, 3)]
    #[case(25, 5)]
    #[case(36, 6)]
    #[case(49, 7)]
    #[case(50, 7)]
    fn integer_roots(#[case] n: usize, #[case] root: usize) {
        assert_eq!(integer_sqrt(n), root);
    }

    #[test]
    fn accepts_well_formed_data() {
        assert!(raw("55 55 1C 55 1C E9 55 55 1C", 5).validate().is_ok());
    }

    #[test]
    fn rejects_non_square_grid() {
        assert!(matches!(
            raw("55 55 1C", 5).validate(),
            Err(Error::NotSquare(3))
        ));
    }

    #[rstest]
    #[case(3)]
    #[case(10)]
    fn rejects_buffer_out_of_range(#[case] buffer_size: usize) {
        assert!(matches!(
            raw("55 55 1C 55", buffer_size).validate(),
            Err(Error::BufferSize(_))
        ));
    }

    #[test]
    fn rejects_mismatched_types() {
        let data = raw("55 55 1C 55", 4).with_types(vec!["a".into(), "b".into()]);
        assert!(matches!(
            data.validate(),
            Err(Error::TypesLength {
                types: 2,
                daemons: 1
            })
        ));
    }

    #[test]
    fn deserializes_camel_case() {
        let data: BreachProtocolRawData = serde_json::from_str(
            r#"{"grid":["55","1C","E9","BD"],"daemons":[["1C","E9"]],"bufferSize":4}"#,
        )
        .unwrap();
        assert_eq!(data.buffer_size, 4);
        assert_eq!(data.size(), 2);
        assert!(data.types.is_none());
    }
}
