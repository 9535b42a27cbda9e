//! Install requests and their redirect responses.

use serde::{Deserialize, Serialize};

/// Body of `POST install`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallRequest {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bundle_id: Option<String>,
}

/// Response of `POST install`: where the browser should go next.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct InstallRedirect {
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body() {
        let file = InstallRequest {
            path: "/app.ipa".to_string(),
            bundle_id: None,
        };
        assert_eq!(serde_json::to_string(&file).unwrap(), r#"{"path":"/app.ipa"}"#);

        let app = InstallRequest {
            path: "/Apps/x.ipa".to_string(),
            bundle_id: Some("com.x".to_string()),
        };
        assert_eq!(
            serde_json::to_string(&app).unwrap(),
            r#"{"path":"/Apps/x.ipa","bundleId":"com.x"}"#
        );
    }
}
