use crate::core::parser::{into_index, scan_lines, split_lines};
use crate::core::serializer::serialize_index;
use crate::core::{ConfigProvider, MakeModelIndex, Pipeline, Storage};
use crate::domain::model::OutputFormat;
use crate::utils::error::{IndexError, Result};

pub struct IndexPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> IndexPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for IndexPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<String>> {
        let path = self.config.input_path();
        tracing::debug!("Reading input from: {}", path);

        let data = self
            .storage
            .read_file(path)
            .await
            .map_err(|e| match e {
                IndexError::IoError(source) => IndexError::InputAccess {
                    path: path.to_string(),
                    source,
                },
                other => other,
            })?;

        let text = String::from_utf8(data).map_err(|e| IndexError::InputAccess {
            path: path.to_string(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
        })?;

        Ok(split_lines(&text))
    }

    async fn transform(&self, lines: Vec<String>) -> Result<MakeModelIndex> {
        let mode = self.config.parse_mode();
        let report = scan_lines(&lines, mode);

        tracing::debug!(
            "Parsed {} record(s), skipped {} empty line(s), {} malformed",
            report.records,
            report.skipped_empty,
            report.diagnostics.len()
        );

        into_index(report, mode)
    }

    async fn load(&self, index: MakeModelIndex) -> Result<String> {
        let output_path = self.config.output_path();
        write_index(&self.storage, &index, output_path, self.config.output_format()).await?;
        Ok(output_path.to_string())
    }
}

/// Serializes the index and hands it to storage in a single write.
pub async fn write_index<S: Storage>(
    storage: &S,
    index: &MakeModelIndex,
    output_path: &str,
    format: OutputFormat,
) -> Result<()> {
    let data = serialize_index(index, format)?;

    tracing::debug!(
        "Writing {} make(s) ({} bytes) to {}",
        index.len(),
        data.len(),
        output_path
    );

    storage
        .write_file(output_path, &data)
        .await
        .map_err(|e| match e {
            IndexError::IoError(source) => IndexError::OutputAccess {
                path: output_path.to_string(),
                source,
            },
            other => other,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::ParseMode;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn with_file(path: &str, data: &str) -> Self {
            let mut files = HashMap::new();
            files.insert(path.to_string(), data.as_bytes().to_vec());
            Self {
                files: Arc::new(Mutex::new(files)),
            }
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                IndexError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig {
        input_path: String,
        output_path: String,
        parse_mode: ParseMode,
        output_format: OutputFormat,
    }

    impl MockConfig {
        fn new() -> Self {
            Self {
                input_path: "makes_data.txt".to_string(),
                output_path: "make_model.json".to_string(),
                parse_mode: ParseMode::FailFast,
                output_format: OutputFormat::Json,
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn input_path(&self) -> &str {
            &self.input_path
        }

        fn output_path(&self) -> &str {
            &self.output_path
        }

        fn parse_mode(&self) -> ParseMode {
            self.parse_mode
        }

        fn output_format(&self) -> OutputFormat {
            self.output_format
        }
    }

    #[tokio::test]
    async fn test_extract_splits_lines() {
        let storage = MockStorage::with_file("makes_data.txt", "Civic, Honda\nModel3, Tesla\n");
        let pipeline = IndexPipeline::new(storage, MockConfig::new());

        let lines = pipeline.extract().await.unwrap();

        assert_eq!(lines, vec!["Civic, Honda", "Model3, Tesla"]);
    }

    #[tokio::test]
    async fn test_extract_missing_input_is_input_access_error() {
        let storage = MockStorage::with_file("other.txt", "");
        let pipeline = IndexPipeline::new(storage, MockConfig::new());

        let err = pipeline.extract().await.unwrap_err();

        match err {
            IndexError::InputAccess { path, .. } => assert_eq!(path, "makes_data.txt"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_extract_rejects_invalid_utf8() {
        let storage = MockStorage::with_file("makes_data.txt", "");
        storage
            .write_file("makes_data.txt", &[0xff, 0xfe, b',', b'x'])
            .await
            .unwrap();
        let pipeline = IndexPipeline::new(storage, MockConfig::new());

        assert!(matches!(
            pipeline.extract().await,
            Err(IndexError::InputAccess { .. })
        ));
    }

    #[tokio::test]
    async fn test_transform_collect_mode_reports_all_lines() {
        let storage = MockStorage::with_file("makes_data.txt", "");
        let mut config = MockConfig::new();
        config.parse_mode = ParseMode::Collect;
        let pipeline = IndexPipeline::new(storage, config);

        let lines = vec!["one".to_string(), "Civic, Honda".to_string(), "two".to_string()];
        let err = pipeline.transform(lines).await.unwrap_err();

        match err {
            IndexError::MalformedRecords { diagnostics } => {
                let lines: Vec<usize> = diagnostics.iter().map(|d| d.line_number).collect();
                assert_eq!(lines, vec![1, 3]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_load_writes_pretty_json() {
        let storage = MockStorage::with_file("makes_data.txt", "");
        let pipeline = IndexPipeline::new(storage.clone(), MockConfig::new());

        let index = pipeline
            .transform(vec!["Civic, Honda".to_string(), "Accord, Honda".to_string()])
            .await
            .unwrap();
        let path = pipeline.load(index).await.unwrap();

        assert_eq!(path, "make_model.json");
        let written = String::from_utf8(storage.get_file("make_model.json").await.unwrap()).unwrap();
        assert_eq!(
            written,
            "{\n    \"Honda\": [\n        \"Civic\",\n        \"Accord\"\n    ]\n}"
        );
    }

    #[tokio::test]
    async fn test_load_csv_format() {
        let storage = MockStorage::with_file("makes_data.txt", "");
        let mut config = MockConfig::new();
        config.output_path = "make_model.csv".to_string();
        config.output_format = OutputFormat::Csv;
        let pipeline = IndexPipeline::new(storage.clone(), config);

        let index = pipeline
            .transform(vec!["Model3, Tesla".to_string()])
            .await
            .unwrap();
        pipeline.load(index).await.unwrap();

        let written = storage.get_file("make_model.csv").await.unwrap();
        assert_eq!(written, b"make,model\nTesla,Model3\n");
    }
}
