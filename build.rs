//! Generates the `user.UserService` client and server stubs.
//!
//! The message types live in `src/rpc/proto.rs` as prost derives, so the
//! service is described with tonic-build's manual builder instead of a
//! `.proto` file and no `protoc` is required at build time.

use tonic_build::manual::{Builder, Method, Service};

const CODEC: &str = "tonic::codec::ProstCodec";

fn unary(name: &str, route: &str, input: &str, output: &str) -> Method {
    Method::builder()
        .name(name)
        .route_name(route)
        .input_type(input)
        .output_type(output)
        .codec_path(CODEC)
        .build()
}

fn main() {
    let list_users = Method::builder()
        .name("list_users")
        .route_name("ListUsers")
        .input_type("super::ListUsersRequest")
        .output_type("super::UserResponse")
        .codec_path(CODEC)
        .server_streaming()
        .build();

    let service = Service::builder()
        .name("UserService")
        .package("user")
        .comment("User record service fronted by the HTTP gateway.")
        .method(unary(
            "create_user",
            "CreateUser",
            "super::CreateUserRequest",
            "super::CreateUserResponse",
        ))
        .method(unary(
            "get_user",
            "GetUser",
            "super::GetUserRequest",
            "super::GetUserResponse",
        ))
        .method(list_users)
        .build();

    Builder::new().compile(&[service]);

    println!("cargo:rerun-if-changed=build.rs");
}
