//! `user.UserService` handler backed by the record store.

use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tonic::{Request, Response, Status};
use tracing::{debug, info, warn};

use crate::observability::metrics;
use crate::rpc::proto::user_service_server::UserService;
use crate::rpc::proto::{
    CreateUserRequest, CreateUserResponse, GetUserRequest, GetUserResponse, ListUsersRequest,
    User, UserResponse,
};
use crate::store::{RecordStore, StoreError};

/// In-flight messages buffered per ListUsers stream.
const LIST_STREAM_BUFFER: usize = 32;

impl From<StoreError> for Status {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation(msg) => Status::invalid_argument(msg),
            err @ StoreError::NotFound(_) => Status::not_found(err.to_string()),
        }
    }
}

/// Exposes [`RecordStore`] operations as remote procedures.
#[derive(Debug, Clone)]
pub struct UserServiceImpl {
    store: RecordStore,
}

impl UserServiceImpl {
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }
}

#[tonic::async_trait]
impl UserService for UserServiceImpl {
    async fn create_user(
        &self,
        request: Request<CreateUserRequest>,
    ) -> Result<Response<CreateUserResponse>, Status> {
        let req = request.into_inner();
        info!(name = %req.name, email = %req.email, "Creating user");

        match self.store.create(req.name, req.email, req.age).await {
            Ok(record) => {
                metrics::record_rpc_call("CreateUser", "ok");
                info!(user_id = %record.id, "User created");
                Ok(Response::new(CreateUserResponse {
                    user: Some(User::from(record.as_ref())),
                    success: true,
                    message: "User created successfully".to_string(),
                }))
            }
            Err(err) => {
                metrics::record_rpc_call("CreateUser", "invalid_argument");
                warn!(error = %err, "Rejected CreateUser request");
                Err(err.into())
            }
        }
    }

    async fn get_user(
        &self,
        request: Request<GetUserRequest>,
    ) -> Result<Response<GetUserResponse>, Status> {
        let req = request.into_inner();
        debug!(user_id = %req.id, "Getting user");

        match self.store.get(&req.id).await {
            Ok(record) => {
                metrics::record_rpc_call("GetUser", "ok");
                Ok(Response::new(GetUserResponse {
                    user: Some(User::from(record.as_ref())),
                }))
            }
            Err(err) => {
                metrics::record_rpc_call("GetUser", "not_found");
                debug!(user_id = %req.id, "User not found");
                Err(err.into())
            }
        }
    }

    type ListUsersStream = ReceiverStream<Result<UserResponse, Status>>;

    async fn list_users(
        &self,
        request: Request<ListUsersRequest>,
    ) -> Result<Response<Self::ListUsersStream>, Status> {
        let req = request.into_inner();
        let limit = usize::try_from(req.limit).unwrap_or(0);
        info!(limit = req.limit, "Listing users");

        let snapshot = self.store.enumerate(limit).await;
        let (tx, rx) = mpsc::channel(LIST_STREAM_BUFFER);

        tokio::spawn(async move {
            let mut sent = 0usize;
            for record in snapshot.iter() {
                let message = UserResponse {
                    user: Some(User::from(record.as_ref())),
                };
                if tx.send(Ok(message)).await.is_err() {
                    metrics::record_rpc_call("ListUsers", "aborted");
                    warn!(sent, "ListUsers receiver dropped, stopping stream");
                    return;
                }
                sent += 1;
            }
            metrics::record_rpc_call("ListUsers", "ok");
            info!(sent, "Sent users");
        });

        Ok(Response::new(ReceiverStream::new(rx)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_stream::StreamExt;
    use tonic::Code;

    fn create_request(name: &str, email: &str, age: u32) -> Request<CreateUserRequest> {
        Request::new(CreateUserRequest {
            name: name.to_string(),
            email: email.to_string(),
            age,
        })
    }

    #[tokio::test]
    async fn test_create_user_success() {
        let service = UserServiceImpl::new(RecordStore::new());
        let resp = service
            .create_user(create_request("Ann", "ann@x.com", 30))
            .await
            .unwrap()
            .into_inner();

        assert!(resp.success);
        assert_eq!(resp.message, "User created successfully");
        let user = resp.user.unwrap();
        assert_eq!(user.name, "Ann");
        assert!(!user.id.is_empty());
    }

    #[tokio::test]
    async fn test_create_user_validation_status() {
        let service = UserServiceImpl::new(RecordStore::new());
        let status = service
            .create_user(create_request("", "ann@x.com", 30))
            .await
            .unwrap_err();

        assert_eq!(status.code(), Code::InvalidArgument);
        assert_eq!(status.message(), "Name and email are required");
        assert!(service.store().is_empty().await);
    }

    #[tokio::test]
    async fn test_get_user_not_found_status() {
        let service = UserServiceImpl::new(RecordStore::new());
        let status = service
            .get_user(Request::new(GetUserRequest {
                id: "unknown-id".into(),
            }))
            .await
            .unwrap_err();

        assert_eq!(status.code(), Code::NotFound);
    }

    #[tokio::test]
    async fn test_list_users_streams_each_record() {
        let store = RecordStore::new();
        for i in 0..4 {
            store
                .create(format!("user{i}"), format!("user{i}@x.com"), 20)
                .await
                .unwrap();
        }
        let service = UserServiceImpl::new(store);

        let stream = service
            .list_users(Request::new(ListUsersRequest { limit: 0 }))
            .await
            .unwrap()
            .into_inner();
        let messages: Vec<_> = stream.collect().await;
        assert_eq!(messages.len(), 4);
        assert!(messages.iter().all(|m| m.as_ref().unwrap().user.is_some()));

        let stream = service
            .list_users(Request::new(ListUsersRequest { limit: 2 }))
            .await
            .unwrap()
            .into_inner();
        assert_eq!(stream.collect::<Vec<_>>().await.len(), 2);
    }

    #[tokio::test]
    async fn test_list_users_negative_limit_means_all() {
        let store = RecordStore::new();
        store.create("Ann", "ann@x.com", 30).await.unwrap();
        store.create("Bob", "bob@x.com", 41).await.unwrap();
        let service = UserServiceImpl::new(store);

        let stream = service
            .list_users(Request::new(ListUsersRequest { limit: -1 }))
            .await
            .unwrap()
            .into_inner();
        assert_eq!(stream.collect::<Vec<_>>().await.len(), 2);
    }

    #[tokio::test]
    async fn test_dropped_stream_releases_snapshot() {
        let store = RecordStore::new();
        for i in 0..(LIST_STREAM_BUFFER * 2) {
            store
                .create(format!("user{i}"), format!("user{i}@x.com"), 20)
                .await
                .unwrap();
        }
        let service = UserServiceImpl::new(store.clone());

        let stream = service
            .list_users(Request::new(ListUsersRequest { limit: 0 }))
            .await
            .unwrap()
            .into_inner();
        drop(stream);

        // The producer task notices the closed channel and drops its read
        // guard, so a writer can get through.
        tokio::time::timeout(
            std::time::Duration::from_secs(1),
            store.create("late", "late@x.com", 1),
        )
        .await
        .expect("writer blocked by abandoned stream")
        .unwrap();
    }
}
