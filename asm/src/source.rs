use crate::error::Error;
use std::io::Read;

/// The whole text of one source file. Tokens and symbols borrow from it.
#[derive(Debug, Clone)]
pub struct SourceBuffer {
    path: String,
    code: String,
}

impl SourceBuffer {
    pub fn new(path: impl Into<String>, code: impl Into<String>) -> Self {
        SourceBuffer {
            path: path.into(),
            code: code.into(),
        }
    }

    pub fn load(path: &str) -> Result<Self, Error> {
        let mut file =
            std::fs::File::open(path).map_err(|e| Error::FileOpen(path.to_string(), e))?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)
            .map_err(|e| Error::FileRead(path.to_string(), e))?;
        // Bytes before the first invalid sequence keep their offsets, and the
        // lexer rejects the replacement character where it meets it.
        let code = match String::from_utf8(bytes) {
            Ok(code) => code,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        };
        Ok(SourceBuffer::new(path, code))
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn len(&self) -> usize {
        self.code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }

    /// 1-based (line, column) of a byte offset. Columns count bytes.
    pub fn locate(&self, offset: usize) -> (usize, usize) {
        let end = offset.min(self.code.len());
        let (mut row, mut col) = (1, 1);
        for &byte in &self.code.as_bytes()[..end] {
            if byte == b'\n' {
                row += 1;
                col = 1;
            } else {
                col += 1;
            }
        }
        (row, col)
    }

    /// Text of a 1-based line, without its terminator.
    pub fn line(&self, row: usize) -> &str {
        self.code
            .split('\n')
            .nth(row.saturating_sub(1))
            .map(|line| line.trim_end_matches('\r'))
            .unwrap_or("")
    }
}
