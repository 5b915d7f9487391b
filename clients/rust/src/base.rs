use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};

const HOST_CODE_HEADER: &str = "x-host-code";

pub(crate) struct BaseClient {
    address: String,
    client: Client,
    session_token: Option<String>,
    host_code: Option<String>,
}

#[derive(Debug)]
pub enum APIError {
    Network,
    MalformedResponse,
    /// The server answered with an error body
    Rejected {
        status: StatusCode,
        kind: String,
        message: String,
    },
    UnexpectedStatusCode(StatusCode),
}

impl APIError {
    /// Machine readable category of a rejected request
    pub fn kind(&self) -> Option<&str> {
        match self {
            Self::Rejected { kind, .. } => Some(kind),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Rejected { status, .. } | Self::UnexpectedStatusCode(status) => Some(*status),
            _ => None,
        }
    }
}

pub type APIResponse<T> = Result<T, APIError>;

#[derive(Deserialize)]
struct ErrorBody {
    kind: String,
    message: String,
}

impl BaseClient {
    pub fn new(address: String) -> Self {
        Self {
            address,
            client: Client::new(),
            session_token: None,
            host_code: None,
        }
    }

    pub fn set_session_token(&mut self, token: String) {
        self.session_token = Some(token);
    }

    pub fn set_host_code(&mut self, code: String) {
        self.host_code = Some(code);
    }

    fn get_client(&self, method: Method, path: String) -> RequestBuilder {
        let url = format!("{}/api/v1/{}", self.address, path);
        let mut builder = self.client.request(method, &url);

        if let Some(token) = &self.session_token {
            builder = builder.bearer_auth(token);
        }
        if let Some(code) = &self.host_code {
            builder = builder.header(HOST_CODE_HEADER, code.clone());
        }
        builder
    }

    async fn handle_api_response<T: for<'de> Deserialize<'de>>(
        &self,
        res: Response,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let status = res.status();
        if status != expected_status_code {
            return Err(match res.json::<ErrorBody>().await {
                Ok(body) => APIError::Rejected {
                    status,
                    kind: body.kind,
                    message: body.message,
                },
                Err(_) => APIError::UnexpectedStatusCode(status),
            });
        }
        res.json::<T>()
            .await
            .map_err(|_| APIError::MalformedResponse)
    }

    async fn send<T: for<'de> Deserialize<'de>>(
        &self,
        builder: RequestBuilder,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let res = match builder.send().await {
            Ok(res) => res,
            Err(_) => return Err(APIError::Network),
        };
        self.handle_api_response(res, expected_status_code).await
    }

    pub async fn get<T: for<'de> Deserialize<'de>>(
        &self,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        self.send(self.get_client(Method::GET, path), expected_status_code)
            .await
    }

    pub async fn put<T: for<'de> Deserialize<'de>, S: Serialize>(
        &self,
        body: S,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        self.send(
            self.get_client(Method::PUT, path).json(&body),
            expected_status_code,
        )
        .await
    }

    pub async fn post<T: for<'de> Deserialize<'de>, S: Serialize>(
        &self,
        body: S,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        self.send(
            self.get_client(Method::POST, path).json(&body),
            expected_status_code,
        )
        .await
    }
}
