//! HTTP adapters for the `list` and `install` endpoints.

use gloo_net::http::{Request, Response};

use crate::config::endpoints;
use crate::core::error::ServiceError;
use crate::core::services::{InstallService, ListingService, ServiceFuture};
use crate::models::{DirectoryPath, InstallRedirect, InstallRequest, Listing, ViewStyle};

/// Listing retrieval over `GET list`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpListingService;

impl ListingService for HttpListingService {
    fn fetch_listing<'a>(
        &'a self,
        path: &'a DirectoryPath,
        style: ViewStyle,
    ) -> ServiceFuture<'a, Result<Listing, ServiceError>> {
        Box::pin(async move {
            let style_param = style.as_param().to_string();
            let response = Request::get(endpoints::LIST)
                .query([("path", path.as_str()), ("style", style_param.as_str())])
                .send()
                .await
                .map_err(network_error)?;
            let body = read_text(check_status(response)?).await?;
            Listing::from_json(style, &body).map_err(|e| ServiceError::Decode(e.to_string()))
        })
    }
}

/// Install requests over `POST install`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpInstallService;

impl InstallService for HttpInstallService {
    fn request_install<'a>(
        &'a self,
        request: &'a InstallRequest,
    ) -> ServiceFuture<'a, Result<String, ServiceError>> {
        Box::pin(async move {
            let response = Request::post(endpoints::INSTALL)
                .json(request)
                .map_err(|_| ServiceError::RequestCreationFailed)?
                .send()
                .await
                .map_err(network_error)?;
            let body = read_text(check_status(response)?).await?;
            let redirect: InstallRedirect =
                serde_json::from_str(&body).map_err(|e| ServiceError::Decode(e.to_string()))?;
            Ok(redirect.url)
        })
    }
}

fn network_error(err: gloo_net::Error) -> ServiceError {
    ServiceError::Network(err.to_string())
}

fn check_status(response: Response) -> Result<Response, ServiceError> {
    if response.ok() {
        Ok(response)
    } else {
        Err(ServiceError::Http(response.status()))
    }
}

async fn read_text(response: Response) -> Result<String, ServiceError> {
    response
        .text()
        .await
        .map_err(|e| ServiceError::Decode(e.to_string()))
}
