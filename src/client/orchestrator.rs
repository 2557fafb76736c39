use super::GuideBackend;
use crate::{
    config::GuideConfig,
    error::{GuideError, Result, INVALID_FILE_MESSAGE},
    logger,
    models::{AnalysisRequest, GenerationRequest, Guide, Step, UploadSession, UploadSlotRequest},
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Runs the upload → transfer → analyze chain for one generation attempt.
///
/// Steps run strictly in order and the first failure ends the attempt. Only
/// one attempt may run at a time; a concurrent call fails with
/// [`GuideError::Busy`] before touching the network.
pub struct Orchestrator {
    backend: Arc<dyn GuideBackend>,
    config: GuideConfig,
    in_flight: AtomicBool,
}

/// Clears the in-flight flag on every exit path.
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Orchestrator {
    pub fn new(backend: Arc<dyn GuideBackend>, config: GuideConfig) -> Self {
        Self {
            backend,
            config,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn config(&self) -> &GuideConfig {
        &self.config
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub async fn generate(&self, request: &GenerationRequest) -> Result<Guide> {
        let _guard = InFlightGuard::acquire(&self.in_flight).ok_or(GuideError::Busy)?;

        if !request.file.is_video() {
            return Err(GuideError::InvalidSelection(
                INVALID_FILE_MESSAGE.to_string(),
            ));
        }

        log::info!(
            "🎬 Generation {} started for {} ({} bytes, {})",
            request.id,
            request.file.name,
            request.file.size(),
            request.file.mime_type
        );
        let _total = logger::timer(&format!("generation {}", request.id));

        let mut session = UploadSession::default();

        let upload_url = {
            let _t = step_timer(Step::RequestUploadSlot);
            let slot = UploadSlotRequest::new(request.file.size(), request.file.mime_type.clone());
            self.backend.request_upload_slot(&slot).await?
        };
        session.upload_url = Some(upload_url.clone());

        let file_uri = {
            let _t = step_timer(Step::TransferFile);
            self.backend
                .transfer_file(&upload_url, &request.file)
                .await?
        };
        session.file_uri = Some(file_uri.clone());
        log::debug!("Upload session: {:?}", session);

        let text = {
            let _t = step_timer(Step::RequestAnalysis);
            let prompt = self.config.compose_prompt(&request.instructions);
            self.backend
                .request_analysis(&AnalysisRequest::new(prompt, file_uri.clone()))
                .await?
        };

        log::info!(
            "✅ Generation {} finished ({} characters)",
            request.id,
            text.len()
        );

        Ok(Guide { text, file_uri })
    }
}

fn step_timer(step: Step) -> logger::Timer {
    log::info!("➡️  Step {}/{}: {}", step.number(), Step::ALL.len(), step.as_str());
    logger::timer(step.as_str())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::SelectedFile;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use tokio::sync::Notify;

    /// Scripted backend that records which steps were called.
    pub(crate) struct RecordingBackend {
        pub calls: Mutex<Vec<Step>>,
        pub prompts: Mutex<Vec<String>>,
        upload: Box<dyn Fn() -> Result<String> + Send + Sync>,
        transfer: Box<dyn Fn() -> Result<String> + Send + Sync>,
        analysis: Box<dyn Fn() -> Result<String> + Send + Sync>,
        gate: Option<Arc<Notify>>,
    }

    impl RecordingBackend {
        pub(crate) fn happy(text: &'static str) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                prompts: Mutex::new(Vec::new()),
                upload: Box::new(|| Ok("https://upload.example/slot".to_string())),
                transfer: Box::new(|| Ok("files/abc".to_string())),
                analysis: Box::new(move || Ok(text.to_string())),
                gate: None,
            }
        }

        pub(crate) fn failing_at(step: Step, error: fn() -> GuideError) -> Self {
            let mut backend = Self::happy("unused");
            match step {
                Step::RequestUploadSlot => backend.upload = Box::new(move || Err(error())),
                Step::TransferFile => backend.transfer = Box::new(move || Err(error())),
                Step::RequestAnalysis => backend.analysis = Box::new(move || Err(error())),
            }
            backend
        }

        fn gated(gate: Arc<Notify>) -> Self {
            let mut backend = Self::happy("done");
            backend.gate = Some(gate);
            backend
        }

        pub(crate) fn calls(&self) -> Vec<Step> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl GuideBackend for RecordingBackend {
        async fn request_upload_slot(&self, request: &UploadSlotRequest) -> Result<String> {
            assert_eq!(request.action, "GEMINI_FILE_UPLOAD");
            self.calls.lock().unwrap().push(Step::RequestUploadSlot);
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            (self.upload)()
        }

        async fn transfer_file(&self, upload_url: &str, _file: &SelectedFile) -> Result<String> {
            assert_eq!(upload_url, "https://upload.example/slot");
            self.calls.lock().unwrap().push(Step::TransferFile);
            (self.transfer)()
        }

        async fn request_analysis(&self, request: &AnalysisRequest) -> Result<String> {
            assert_eq!(request.uri, "files/abc");
            self.calls.lock().unwrap().push(Step::RequestAnalysis);
            self.prompts.lock().unwrap().push(request.prompt.clone());
            (self.analysis)()
        }
    }

    pub(crate) fn video() -> SelectedFile {
        SelectedFile::new("demo.mp4", "video/mp4", vec![1, 2, 3, 4])
    }

    fn orchestrator(backend: Arc<RecordingBackend>) -> Orchestrator {
        Orchestrator::new(backend, GuideConfig::new().with_prompt_preamble("Make a guide."))
    }

    #[tokio::test]
    async fn test_all_steps_in_order() {
        let backend = Arc::new(RecordingBackend::happy("Step 1: unscrew the lid"));
        let orchestrator = orchestrator(backend.clone());

        let guide = orchestrator
            .generate(&GenerationRequest::new(video(), "  keep it short "))
            .await
            .unwrap();

        assert_eq!(guide.text, "Step 1: unscrew the lid");
        assert_eq!(guide.file_uri, "files/abc");
        assert_eq!(backend.calls(), Step::ALL.to_vec());
        assert_eq!(
            backend.prompts.lock().unwrap().clone(),
            vec!["Make a guide. keep it short".to_string()]
        );
        assert!(!orchestrator.is_busy());
    }

    #[tokio::test]
    async fn test_rejected_upload_stops_before_transfer() {
        let backend = Arc::new(RecordingBackend::failing_at(Step::RequestUploadSlot, || {
            GuideError::Rejected {
                step: Step::RequestUploadSlot,
                raw: r#"{"success":false}"#.into(),
            }
        }));
        let orchestrator = orchestrator(backend.clone());

        let err = orchestrator
            .generate(&GenerationRequest::new(video(), ""))
            .await
            .unwrap_err();

        assert_eq!(err.step(), Some(Step::RequestUploadSlot));
        assert_eq!(backend.calls(), vec![Step::RequestUploadSlot]);
        assert!(!orchestrator.is_busy());
    }

    #[tokio::test]
    async fn test_missing_uri_stops_before_analysis() {
        let backend = Arc::new(RecordingBackend::failing_at(Step::TransferFile, || {
            GuideError::IncompleteResponse {
                step: Step::TransferFile,
                field: "file.uri",
                raw: "{}".into(),
            }
        }));
        let orchestrator = orchestrator(backend.clone());

        let err = orchestrator
            .generate(&GenerationRequest::new(video(), ""))
            .await
            .unwrap_err();

        assert_eq!(err.step(), Some(Step::TransferFile));
        assert_eq!(
            backend.calls(),
            vec![Step::RequestUploadSlot, Step::TransferFile]
        );
    }

    #[tokio::test]
    async fn test_non_video_never_reaches_network() {
        let backend = Arc::new(RecordingBackend::happy("x"));
        let orchestrator = orchestrator(backend.clone());
        let file = SelectedFile::new("notes.txt", "text/plain", b"hi".to_vec());

        let err = orchestrator
            .generate(&GenerationRequest::new(file, ""))
            .await
            .unwrap_err();

        assert!(matches!(err, GuideError::InvalidSelection(_)));
        assert_eq!(err.user_message(), INVALID_FILE_MESSAGE);
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_second_attempt_while_busy() {
        let gate = Arc::new(Notify::new());
        let backend = Arc::new(RecordingBackend::gated(gate.clone()));
        let orchestrator = Arc::new(orchestrator(backend.clone()));

        let first = {
            let orchestrator = orchestrator.clone();
            tokio::spawn(async move {
                orchestrator
                    .generate(&GenerationRequest::new(video(), ""))
                    .await
            })
        };

        while !orchestrator.is_busy() {
            tokio::task::yield_now().await;
        }

        let err = orchestrator
            .generate(&GenerationRequest::new(video(), ""))
            .await
            .unwrap_err();
        assert!(matches!(err, GuideError::Busy));

        gate.notify_one();
        let guide = first.await.unwrap().unwrap();
        assert_eq!(guide.text, "done");
        assert_eq!(backend.calls(), Step::ALL.to_vec());
        assert!(!orchestrator.is_busy());
    }
}
