use std::fmt;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::Error;

/// Where the content of one email comes from.
///
pub enum EmlSource {
    /// A `.eml` file, read completely before parsing.
    ///
    Path(PathBuf),

    /// The content of a `.eml` file already in memory.
    ///
    Bytes(Bytes),

    /// A stream of the content of a `.eml` file, drained completely before parsing.
    ///
    Reader(Box<dyn AsyncRead + Send + Unpin>),
}

impl EmlSource {
    /// Create a source from an asynchronous reader.
    ///
    pub fn reader(reader: impl AsyncRead + Send + Unpin + 'static) -> Self {
        EmlSource::Reader(Box::new(reader))
    }

    /// A short description of the source, used in errors and logs.
    ///
    pub fn origin(&self) -> String {
        match self {
            EmlSource::Path(path) => path.display().to_string(),
            EmlSource::Bytes(bytes) => format!("<{} bytes>", bytes.len()),
            EmlSource::Reader(_) => "<stream>".to_string(),
        }
    }

    /// Read the complete content of the source.
    ///
    /// # Returns
    ///
    /// * `Ok(Bytes)` - The raw content of the email.
    /// * `Err(Error::InputRead)` - If the file or stream could not be read.
    ///
    pub async fn read(self) -> Result<Bytes, Error> {
        let origin = self.origin();
        match self {
            EmlSource::Path(path) => tokio::fs::read(&path).await
                .map(Bytes::from)
                .map_err(|source| Error::InputRead { origin, source }),

            EmlSource::Bytes(bytes) => Ok(bytes),

            EmlSource::Reader(mut reader) => {
                let mut content = vec![];
                reader.read_to_end(&mut content).await
                    .map_err(|source| Error::InputRead { origin, source })?;
                Ok(Bytes::from(content))
            }
        }
    }
}

impl fmt::Debug for EmlSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EmlSource").field(&self.origin()).finish()
    }
}

impl From<PathBuf> for EmlSource {
    fn from(path: PathBuf) -> Self {
        EmlSource::Path(path)
    }
}

impl From<&Path> for EmlSource {
    fn from(path: &Path) -> Self {
        EmlSource::Path(path.to_path_buf())
    }
}

impl From<&str> for EmlSource {
    /// A string is a path, like it is for the command line tools reading `.eml` files.
    ///
    fn from(path: &str) -> Self {
        EmlSource::Path(PathBuf::from(path))
    }
}

impl From<Bytes> for EmlSource {
    fn from(bytes: Bytes) -> Self {
        EmlSource::Bytes(bytes)
    }
}

impl From<Vec<u8>> for EmlSource {
    fn from(content: Vec<u8>) -> Self {
        EmlSource::Bytes(Bytes::from(content))
    }
}

impl From<&'static [u8]> for EmlSource {
    fn from(content: &'static [u8]) -> Self {
        EmlSource::Bytes(Bytes::from_static(content))
    }
}

/// One email, or several emails converted together.
///
#[derive(Debug)]
pub enum EmlInput {
    /// A single email, producing a single PDF.
    ///
    One(EmlSource),

    /// Several emails, producing one PDF each in the same order.
    ///
    Many(Vec<EmlSource>),
}

impl EmlInput {
    /// Number of emails in the input.
    ///
    pub fn len(&self) -> usize {
        match self {
            EmlInput::One(_) => 1,
            EmlInput::Many(sources) => sources.len(),
        }
    }

    /// Whether the input contains no email at all.
    ///
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The sources of the input, in order.
    ///
    pub fn into_sources(self) -> Vec<EmlSource> {
        match self {
            EmlInput::One(source) => vec![source],
            EmlInput::Many(sources) => sources,
        }
    }
}

impl From<EmlSource> for EmlInput {
    fn from(source: EmlSource) -> Self {
        EmlInput::One(source)
    }
}

macro_rules! single_input_from {
    ($($source:ty),+) => {
        $(
            impl From<$source> for EmlInput {
                fn from(source: $source) -> Self {
                    EmlInput::One(source.into())
                }
            }
        )+
    };
}

single_input_from!(PathBuf, &Path, &str, Bytes, Vec<u8>, &'static [u8]);

impl From<Vec<EmlSource>> for EmlInput {
    fn from(sources: Vec<EmlSource>) -> Self {
        EmlInput::Many(sources)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[tokio::test]
    async fn test_read_path() -> anyhow::Result<()> {
        let content = EmlSource::from(test_utils::eml_path("plain.eml")).read().await?;
        assert_eq!(test_utils::eml("plain.eml"), content.to_vec());
        Ok(())
    }

    #[tokio::test]
    async fn test_read_missing_path() {
        let result = EmlSource::from("../resources/eml/missing.eml").read().await;

        match result {
            Err(Error::InputRead { origin, .. }) => assert_eq!("../resources/eml/missing.eml", origin),
            other => panic!("Unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_read_reader() -> anyhow::Result<()> {
        let source = EmlSource::reader(Cursor::new(b"Subject: streamed\r\n\r\nbody".to_vec()));
        assert_eq!("<stream>", source.origin());

        let content = source.read().await?;
        assert_eq!(&b"Subject: streamed\r\n\r\nbody"[..], &content[..]);
        Ok(())
    }

    #[test]
    fn test_input_conversions() {
        assert!(matches!(EmlInput::from("mail.eml"), EmlInput::One(EmlSource::Path(_))));
        assert!(matches!(EmlInput::from(b"raw".to_vec()), EmlInput::One(EmlSource::Bytes(_))));

        let input = EmlInput::from(vec![EmlSource::from("a.eml"), EmlSource::from("b.eml")]);
        assert_eq!(2, input.len());
        assert!(!input.is_empty());
        assert!(EmlInput::from(Vec::<EmlSource>::new()).is_empty());
    }
}
