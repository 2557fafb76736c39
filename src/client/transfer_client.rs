use super::webhook_client::{network_failure, parse_body, read_body};
use crate::{
    error::{GuideError, Result},
    models::{FileTransferResponse, SelectedFile, Step},
};
use reqwest::{
    multipart::{Form, Part},
    Body, Client,
};

/// Sends raw file bytes to the upload URL issued in step 1.
#[derive(Clone)]
pub struct TransferClient {
    client: Client,
}

impl TransferClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub async fn transfer(&self, upload_url: &str, file: &SelectedFile) -> Result<String> {
        let step = Step::TransferFile;

        // `Bytes` clones share the buffer
        let part = Part::stream_with_length(Body::from(file.data.clone()), file.size())
            .file_name(file.name.clone())
            .mime_str(&file.mime_type)
            .map_err(|e| {
                GuideError::InvalidSelection(format!(
                    "Unusable MIME type '{}': {}",
                    file.mime_type, e
                ))
            })?;
        let form = Form::new().part("file", part);

        log::info!("Sending {} bytes to upload slot", file.size());

        let response = self
            .client
            .post(upload_url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| network_failure(step, e))?;

        let raw = read_body(step, response).await?;
        let body: FileTransferResponse = parse_body(step, &raw)?;

        body.file
            .and_then(|file| file.uri)
            .filter(|uri| !uri.is_empty())
            .ok_or(GuideError::IncompleteResponse {
                step,
                field: "file.uri",
                raw,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;
    use wiremock::matchers::{header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn clip() -> SelectedFile {
        SelectedFile::new("clip.mp4", "video/mp4", b"\x00\x00\x00\x18ftypmp42".to_vec())
    }

    #[tokio::test]
    async fn test_transfer_returns_uri() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/upload/slot-7"))
            .and(header_exists("content-type"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "file": {"name": "files/abc", "uri": "https://files.example/v1/files/abc", "mimeType": "video/mp4"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let uri = TransferClient::new(Client::new())
            .transfer(&format!("{}/upload/slot-7", server.uri()), &clip())
            .await
            .unwrap();
        assert_eq!(uri, "https://files.example/v1/files/abc");

        let requests = server.received_requests().await.unwrap();
        let content_type = requests[0]
            .headers
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(content_type.starts_with("multipart/form-data"));
        let body = String::from_utf8_lossy(&requests[0].body);
        assert!(body.contains("name=\"file\""));
        assert!(body.contains("filename=\"clip.mp4\""));
        assert!(requests[0].body.windows(8).any(|w| w == b"ftypmp42"));
    }

    #[tokio::test]
    async fn test_transfer_missing_uri() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"file": {"name": "files/abc"}})))
            .mount(&server)
            .await;

        let err = TransferClient::new(Client::new())
            .transfer(&server.uri(), &clip())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IncompleteResponse);
        assert!(matches!(
            err,
            GuideError::IncompleteResponse {
                step: Step::TransferFile,
                field: "file.uri",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_transfer_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("upload ok"))
            .mount(&server)
            .await;

        let err = TransferClient::new(Client::new())
            .transfer(&server.uri(), &clip())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedResponse);
        assert_eq!(err.raw_response(), Some("upload ok"));
    }
}
