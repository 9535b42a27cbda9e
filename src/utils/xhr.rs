//! Upload transport over `XMLHttpRequest`.
//!
//! `fetch` has no upload progress events, so uploads go through XHR. The
//! request is aborted when the transfer future is dropped.

use std::cell::RefCell;
use std::rc::Rc;

use futures::channel::oneshot;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{File, FormData, ProgressEvent, XmlHttpRequest};

use crate::config::{endpoints, upload_fields};
use crate::core::error::{ServiceError, TransferError};
use crate::core::services::{ProgressSink, ServiceFuture, UploadSource, UploadTransport};
use crate::models::UploadRequest;

/// A browser file picked or dropped by the user.
#[derive(Debug, Clone)]
pub struct PickedFile {
    file: File,
    relative_path: Option<String>,
}

impl PickedFile {
    pub fn new(file: File) -> Self {
        // Folder drops expose the structure as `relativePath` (set by drop
        // handlers) or `webkitRelativePath` (directory pickers).
        let relative_path = ["relativePath", "webkitRelativePath"]
            .iter()
            .filter_map(|key| js_sys::Reflect::get(&file, &JsValue::from_str(key)).ok())
            .filter_map(|value| value.as_string())
            .find(|value| !value.is_empty());
        Self {
            file,
            relative_path,
        }
    }
}

impl UploadSource for PickedFile {
    fn file_name(&self) -> String {
        self.file.name()
    }

    fn relative_path(&self) -> Option<String> {
        self.relative_path.clone()
    }
}

/// Uploads files as `multipart/form-data` to `POST upload`.
#[derive(Debug, Clone, Copy, Default)]
pub struct XhrUploadTransport;

impl UploadTransport<PickedFile> for XhrUploadTransport {
    fn submit<'a>(
        &'a self,
        file: PickedFile,
        request: &'a UploadRequest,
        progress: ProgressSink,
    ) -> ServiceFuture<'a, Result<(), TransferError>> {
        Box::pin(async move {
            let transfer = XhrTransfer::start(&file, request, progress)?;
            transfer.finished().await
        })
    }
}

type Callback = Closure<dyn FnMut(ProgressEvent)>;
type Completion = Rc<RefCell<Option<oneshot::Sender<Result<(), TransferError>>>>>;

/// One running XHR and the callbacks wired to it.
struct XhrTransfer {
    xhr: XmlHttpRequest,
    completion: Completion,
    receiver: Option<oneshot::Receiver<Result<(), TransferError>>>,
    _callbacks: Vec<Callback>,
}

impl XhrTransfer {
    fn start(
        file: &PickedFile,
        request: &UploadRequest,
        progress: ProgressSink,
    ) -> Result<Self, ServiceError> {
        let form = build_form(file, request).map_err(|_| ServiceError::RequestCreationFailed)?;
        let xhr = XmlHttpRequest::new().map_err(|_| ServiceError::RequestCreationFailed)?;
        xhr.open("POST", endpoints::UPLOAD)
            .map_err(|_| ServiceError::RequestCreationFailed)?;

        let (sender, receiver) = oneshot::channel();
        let completion: Completion = Rc::new(RefCell::new(Some(sender)));

        let on_load = {
            let xhr = xhr.clone();
            let completion = Rc::clone(&completion);
            Closure::<dyn FnMut(ProgressEvent)>::new(move |_: ProgressEvent| {
                let status = xhr.status().unwrap_or(0);
                let result = if (200..300).contains(&status) {
                    Ok(())
                } else {
                    Err(ServiceError::Http(status).into())
                };
                complete(&completion, result);
            })
        };
        let on_error = {
            let completion = Rc::clone(&completion);
            Closure::<dyn FnMut(ProgressEvent)>::new(move |_: ProgressEvent| {
                let err = ServiceError::Network("upload request failed".to_string());
                complete(&completion, Err(err.into()));
            })
        };
        let on_abort = {
            let completion = Rc::clone(&completion);
            Closure::<dyn FnMut(ProgressEvent)>::new(move |_: ProgressEvent| {
                complete(&completion, Err(TransferError::Aborted));
            })
        };
        let on_progress = Closure::<dyn FnMut(ProgressEvent)>::new(move |event: ProgressEvent| {
            if event.length_computable() {
                progress(event.loaded() as u64, event.total() as u64);
            }
        });

        xhr.set_onload(Some(on_load.as_ref().unchecked_ref()));
        xhr.set_onerror(Some(on_error.as_ref().unchecked_ref()));
        xhr.set_onabort(Some(on_abort.as_ref().unchecked_ref()));
        if let Ok(upload) = xhr.upload() {
            upload.set_onprogress(Some(on_progress.as_ref().unchecked_ref()));
        }

        let transfer = Self {
            xhr,
            completion,
            receiver: Some(receiver),
            _callbacks: vec![on_load, on_error, on_abort, on_progress],
        };
        transfer
            .xhr
            .send_with_opt_form_data(Some(&form))
            .map_err(|e| ServiceError::Network(format!("{e:?}")))?;
        Ok(transfer)
    }

    async fn finished(mut self) -> Result<(), TransferError> {
        let Some(receiver) = self.receiver.take() else {
            return Err(TransferError::Aborted);
        };
        receiver.await.unwrap_or(Err(TransferError::Aborted))
    }

    fn detach_callbacks(&self) {
        self.xhr.set_onload(None);
        self.xhr.set_onerror(None);
        self.xhr.set_onabort(None);
        if let Ok(upload) = self.xhr.upload() {
            upload.set_onprogress(None);
        }
    }
}

impl Drop for XhrTransfer {
    fn drop(&mut self) {
        // Callbacks die with this struct; the browser must not call them after.
        self.detach_callbacks();
        if self.completion.borrow().is_some() {
            let _ = self.xhr.abort();
        }
    }
}

fn complete(completion: &Completion, result: Result<(), TransferError>) {
    if let Some(sender) = completion.borrow_mut().take() {
        let _ = sender.send(result);
    }
}

fn build_form(file: &PickedFile, request: &UploadRequest) -> Result<FormData, JsValue> {
    let form = FormData::new()?;
    form.append_with_str(upload_fields::PATH, request.path.as_str())?;
    form.append_with_str(upload_fields::RELATIVE_PATH, &request.relative_path)?;
    form.append_with_blob_and_filename(upload_fields::FILE, &file.file, &request.file_name)?;
    Ok(form)
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn file(name: &str) -> File {
        let parts = js_sys::Array::of1(&JsValue::from_str("data"));
        File::new_with_str_sequence(&parts, name).expect("file")
    }

    #[wasm_bindgen_test]
    fn test_picked_file_without_folder() {
        let picked = PickedFile::new(file("a.txt"));
        assert_eq!(picked.file_name(), "a.txt");
        assert_eq!(picked.relative_path(), None);
    }

    #[wasm_bindgen_test]
    fn test_picked_file_keeps_dropped_folder() {
        let f = file("b.txt");
        js_sys::Reflect::set(
            &f,
            &JsValue::from_str("relativePath"),
            &JsValue::from_str("photos/b.txt"),
        )
        .expect("set relativePath");
        assert_eq!(
            PickedFile::new(f).relative_path().as_deref(),
            Some("photos/b.txt")
        );
    }
}
