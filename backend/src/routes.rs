use actix_files::Files;
use actix_multipart::Multipart;
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{web, HttpResponse};
use log::{error, info};
use shared::{EncodedImage, Endpoint, DOWNLOAD_FILENAME};
use uuid::Uuid;

use crate::error::ApiError;
use crate::processor::{ProcessedImage, Processor};
use crate::upload::{read_upload_form, UploadLimit};

pub fn configure_routes<P: Processor + 'static>(cfg: &mut web::ServiceConfig, frontend_dir: String) {
    configure_api::<P>(cfg);
    cfg.service(Files::new("/", frontend_dir).index_file("index.html"));
}

pub fn configure_api<P: Processor + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/health").route(web::get().to(health)))
        .service(web::resource(Endpoint::Upload.path()).route(web::post().to(handle_upload::<P>)))
        .service(
            web::resource(Endpoint::ProcessImage.path())
                .route(web::post().to(handle_process_image::<P>)),
        );
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().body("Hi comp graphics!")
}

async fn relay<P: Processor>(
    processor: &P,
    limit: UploadLimit,
    payload: Multipart,
    endpoint: Endpoint,
) -> Result<ProcessedImage, ApiError> {
    let request_id = Uuid::new_v4();

    let job = match read_upload_form(payload, limit).await.and_then(|form| form.into_job()) {
        Ok(job) => job,
        Err(e) => {
            info!("[{}] {} rejected: {}", request_id, endpoint.path(), e);
            return Err(e);
        }
    };

    info!(
        "[{}] {} accepted {} ({} bytes, h = {})",
        request_id,
        endpoint.path(),
        job.file_name,
        job.image.len(),
        job.threshold
    );

    match processor.process(job).await {
        Ok(processed) => {
            info!(
                "[{}] processed image ready ({} bytes, {})",
                request_id,
                processed.bytes.len(),
                processed.mime_type()
            );
            Ok(processed)
        }
        Err(e) => {
            error!("[{}] processing failed: {}", request_id, e);
            Err(e.into())
        }
    }
}

async fn handle_upload<P: Processor + 'static>(
    processor: web::Data<P>,
    limit: web::Data<UploadLimit>,
    payload: Multipart,
) -> Result<HttpResponse, ApiError> {
    let processed = relay(processor.get_ref(), **limit, payload, Endpoint::Upload).await?;
    Ok(HttpResponse::Ok().json(EncodedImage::from_bytes(&processed.bytes)))
}

async fn handle_process_image<P: Processor + 'static>(
    processor: web::Data<P>,
    limit: web::Data<UploadLimit>,
    payload: Multipart,
) -> Result<HttpResponse, ApiError> {
    let processed = relay(processor.get_ref(), **limit, payload, Endpoint::ProcessImage).await?;

    let disposition = ContentDisposition {
        disposition: DispositionType::Attachment,
        parameters: vec![DispositionParam::Filename(DOWNLOAD_FILENAME.to_string())],
    };

    Ok(HttpResponse::Ok()
        .content_type(processed.mime_type())
        .insert_header(disposition)
        .body(processed.bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processor::{ProcessError, ProcessJob};
    use actix_web::http::{header, StatusCode};
    use actix_web::{test, App};
    use std::sync::{Arc, Mutex};

    const BOUNDARY: &str = "remover-test-boundary";
    const PNG: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";
    const JPEG: &[u8] = b"\xFF\xD8\xFF\xE0\0\x10JFIF";

    #[derive(Default)]
    struct FakeProcessor {
        jobs: Mutex<Vec<ProcessJob>>,
        fail: bool,
    }

    impl Processor for FakeProcessor {
        async fn process(&self, job: ProcessJob) -> Result<ProcessedImage, ProcessError> {
            self.jobs.lock().unwrap().push(job);
            if self.fail {
                return Err(ProcessError::Upstream {
                    status: 500,
                    body: "solver diverged".into(),
                });
            }
            ProcessedImage::from_bytes(PNG.to_vec())
        }
    }

    enum Part<'a> {
        Text(&'a str, &'a str),
        File(&'a str, &'a str, &'a [u8]),
    }

    fn multipart_body(parts: &[Part]) -> Vec<u8> {
        let mut body = Vec::new();
        for part in parts {
            body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
            match part {
                Part::Text(name, value) => {
                    body.extend_from_slice(
                        format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n", name, value)
                            .as_bytes(),
                    );
                }
                Part::File(name, file_name, bytes) => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
                            name, file_name
                        )
                        .as_bytes(),
                    );
                    body.extend_from_slice(bytes);
                    body.extend_from_slice(b"\r\n");
                }
            }
        }
        body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
        body
    }

    fn upload_request(path: &str, parts: &[Part]) -> test::TestRequest {
        test::TestRequest::post()
            .uri(path)
            .insert_header((
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            ))
            .set_payload(multipart_body(parts))
    }

    async fn call(
        processor: Arc<FakeProcessor>,
        max_bytes: usize,
        request: test::TestRequest,
    ) -> actix_web::dev::ServiceResponse {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::from(processor))
                .app_data(web::Data::new(UploadLimit { max_bytes }))
                .configure(configure_api::<FakeProcessor>),
        )
        .await;
        test::call_service(&app, request.to_request()).await
    }

    #[actix_web::test]
    async fn upload_returns_base64_json() {
        let processor = Arc::new(FakeProcessor::default());
        let request = upload_request(
            "/upload",
            &[Part::Text("h", "0.04"), Part::File("file", "building.jpg", JPEG)],
        );

        let resp = call(processor.clone(), 1024, request).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: EncodedImage = test::read_body_json(resp).await;
        assert_eq!(body.decode().unwrap(), PNG);

        let jobs = processor.jobs.lock().unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].threshold.as_field(), "0.04");
        assert_eq!(jobs[0].file_name, "building.jpg");
        assert_eq!(jobs[0].image, JPEG);
    }

    #[actix_web::test]
    async fn process_image_returns_png_attachment() {
        let processor = Arc::new(FakeProcessor::default());
        let request = upload_request(
            "/process_image",
            &[Part::File("file", "dog.jpg", JPEG), Part::Text("debug", "True")],
        );

        let resp = call(processor.clone(), 1024, request).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers().get(header::CONTENT_TYPE).unwrap(), "image/png");
        assert_eq!(
            resp.headers().get(header::CONTENT_DISPOSITION).unwrap(),
            "attachment; filename=\"processed_image.png\""
        );
        assert_eq!(test::read_body(resp).await.as_ref(), PNG);

        let jobs = processor.jobs.lock().unwrap();
        assert_eq!(jobs[0].threshold.as_field(), "0.03");
        assert!(jobs[0].debug);
    }

    #[actix_web::test]
    async fn missing_file_part_is_rejected_without_processing() {
        let processor = Arc::new(FakeProcessor::default());
        let request = upload_request("/process_image", &[Part::Text("h", "0.1")]);

        let resp = call(processor.clone(), 1024, request).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(test::read_body(resp).await, "No file part in the request");
        assert!(processor.jobs.lock().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn empty_filename_is_rejected() {
        let processor = Arc::new(FakeProcessor::default());
        let request = upload_request("/upload", &[Part::Text("h", "0.1"), Part::File("file", "", b"")]);

        let resp = call(processor, 1024, request).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(test::read_body(resp).await, "No file selected for uploading");
    }

    #[actix_web::test]
    async fn invalid_threshold_is_rejected() {
        let processor = Arc::new(FakeProcessor::default());
        let request = upload_request(
            "/upload",
            &[Part::Text("h", "lots"), Part::File("file", "train.jpg", JPEG)],
        );

        let resp = call(processor.clone(), 1024, request).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(test::read_body(resp).await, "Invalid value for parameter 'h'");
        assert!(processor.jobs.lock().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn blank_threshold_part_is_rejected_on_blob_endpoint() {
        let processor = Arc::new(FakeProcessor::default());
        let request = upload_request(
            "/process_image",
            &[Part::Text("h", " "), Part::File("file", "dog.jpg", JPEG)],
        );

        let resp = call(processor.clone(), 1024, request).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(test::read_body(resp).await, "Invalid value for parameter 'h'");
        assert!(processor.jobs.lock().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn oversized_upload_is_refused() {
        let processor = Arc::new(FakeProcessor::default());
        let big = vec![0xFFu8; 64];
        let request = upload_request("/upload", &[Part::File("file", "big.jpg", &big)]);

        let resp = call(processor, 16, request).await;
        assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[actix_web::test]
    async fn upstream_failure_is_bad_gateway() {
        let processor = Arc::new(FakeProcessor {
            fail: true,
            ..FakeProcessor::default()
        });
        let request = upload_request("/upload", &[Part::Text("h", "0.5"), Part::File("file", "a.jpg", JPEG)]);

        let resp = call(processor, 1024, request).await;
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    }

    #[actix_web::test]
    async fn health_answers() {
        let resp = call(
            Arc::new(FakeProcessor::default()),
            1024,
            test::TestRequest::get().uri("/health"),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(test::read_body(resp).await, "Hi comp graphics!");
    }
}
