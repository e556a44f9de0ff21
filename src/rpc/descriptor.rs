//! Protobuf descriptor for `user.proto`, served through gRPC reflection.
//!
//! The messages in [`proto`](crate::rpc::proto) are plain prost derives, so
//! there is no `protoc` output to embed. The same schema is described here
//! with `prost-types` and must stay in step with those derives.

use prost_types::field_descriptor_proto::{Label, Type};
use prost_types::{
    DescriptorProto, FieldDescriptorProto, FileDescriptorProto, FileDescriptorSet,
    MethodDescriptorProto, ServiceDescriptorProto,
};

/// Fully qualified service name.
pub const SERVICE_NAME: &str = "user.UserService";

const PACKAGE: &str = "user";

fn scalar(name: &str, number: i32, ty: Type) -> FieldDescriptorProto {
    FieldDescriptorProto {
        name: Some(name.to_string()),
        number: Some(number),
        label: Some(Label::Optional as i32),
        r#type: Some(ty as i32),
        json_name: Some(json_name(name)),
        ..Default::default()
    }
}

fn message_field(name: &str, number: i32, message: &str) -> FieldDescriptorProto {
    FieldDescriptorProto {
        type_name: Some(format!(".{PACKAGE}.{message}")),
        ..scalar(name, number, Type::Message)
    }
}

fn message(name: &str, fields: Vec<FieldDescriptorProto>) -> DescriptorProto {
    DescriptorProto {
        name: Some(name.to_string()),
        field: fields,
        ..Default::default()
    }
}

fn method(name: &str, input: &str, output: &str, server_streaming: bool) -> MethodDescriptorProto {
    MethodDescriptorProto {
        name: Some(name.to_string()),
        input_type: Some(format!(".{PACKAGE}.{input}")),
        output_type: Some(format!(".{PACKAGE}.{output}")),
        client_streaming: Some(false),
        server_streaming: Some(server_streaming),
        ..Default::default()
    }
}

/// lowerCamelCase, as protoc derives it.
fn json_name(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Descriptor of `user.proto`.
pub fn user_proto() -> FileDescriptorProto {
    let messages = vec![
        message(
            "User",
            vec![
                scalar("id", 1, Type::String),
                scalar("name", 2, Type::String),
                scalar("email", 3, Type::String),
                scalar("age", 4, Type::Uint32),
                scalar("created_at", 5, Type::String),
            ],
        ),
        message(
            "CreateUserRequest",
            vec![
                scalar("name", 1, Type::String),
                scalar("email", 2, Type::String),
                scalar("age", 3, Type::Uint32),
            ],
        ),
        message(
            "CreateUserResponse",
            vec![
                message_field("user", 1, "User"),
                scalar("success", 2, Type::Bool),
                scalar("message", 3, Type::String),
            ],
        ),
        message("GetUserRequest", vec![scalar("id", 1, Type::String)]),
        message("GetUserResponse", vec![message_field("user", 1, "User")]),
        message("ListUsersRequest", vec![scalar("limit", 1, Type::Int32)]),
        message("UserResponse", vec![message_field("user", 1, "User")]),
    ];

    let service = ServiceDescriptorProto {
        name: Some("UserService".to_string()),
        method: vec![
            method("CreateUser", "CreateUserRequest", "CreateUserResponse", false),
            method("GetUser", "GetUserRequest", "GetUserResponse", false),
            method("ListUsers", "ListUsersRequest", "UserResponse", true),
        ],
        ..Default::default()
    };

    FileDescriptorProto {
        name: Some("user.proto".to_string()),
        package: Some(PACKAGE.to_string()),
        message_type: messages,
        service: vec![service],
        syntax: Some("proto3".to_string()),
        ..Default::default()
    }
}

/// Descriptor set registered with the reflection service.
pub fn file_descriptor_set() -> FileDescriptorSet {
    FileDescriptorSet {
        file: vec![user_proto()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rpc::proto::{CreateUserResponse, User};
    use prost::Message;

    #[test]
    fn test_service_shape() {
        let file = user_proto();
        let service = &file.service[0];
        assert_eq!(
            format!("{}.{}", file.package(), service.name()),
            SERVICE_NAME
        );

        let names: Vec<_> = service.method.iter().map(|m| m.name()).collect();
        assert_eq!(names, vec!["CreateUser", "GetUser", "ListUsers"]);

        let list = &service.method[2];
        assert!(list.server_streaming());
        assert_eq!(list.output_type(), ".user.UserResponse");
    }

    #[test]
    fn test_json_name() {
        assert_eq!(json_name("created_at"), "createdAt");
        assert_eq!(json_name("id"), "id");
    }

    #[test]
    fn test_field_numbers_match_messages() {
        // Encoding a single field and reading back its tag ties the
        // descriptor to the prost derive.
        let file = user_proto();
        let user = file
            .message_type
            .iter()
            .find(|m| m.name() == "User")
            .unwrap();
        let created_at = user.field.iter().find(|f| f.name() == "created_at").unwrap();

        let bytes = User {
            created_at: "x".into(),
            ..Default::default()
        }
        .encode_to_vec();
        assert_eq!(i32::from(bytes[0] >> 3), created_at.number());

        let response = file
            .message_type
            .iter()
            .find(|m| m.name() == "CreateUserResponse")
            .unwrap();
        let success = response.field.iter().find(|f| f.name() == "success").unwrap();
        let bytes = CreateUserResponse {
            success: true,
            ..Default::default()
        }
        .encode_to_vec();
        assert_eq!(i32::from(bytes[0] >> 3), success.number());
    }
}
