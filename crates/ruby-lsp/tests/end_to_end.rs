//! End-to-end scenarios driven through `Server::handle_request`, mirroring
//! spec.md's S1-S6 walkthroughs against a real instance rather than calling
//! individual handler functions directly.

use ruby_lsp::Server;
use ruby_lsp_protocol::JsonRpcRequest;
use serde_json::{json, Value};

fn request(id: Option<Value>, method: &str, params: Option<Value>) -> JsonRpcRequest {
    serde_json::from_value(json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": method,
        "params": params,
    }))
    .expect("valid request shape")
}

fn write_rb(dir: &std::path::Path, relative: &str, content: &str) {
    let path = dir.join(relative);
    std::fs::create_dir_all(path.parent().expect("has parent")).expect("mkdir");
    std::fs::write(path, content).expect("write fixture");
}

fn initialized_server() -> Server {
    let mut server = Server::new(Box::new(Vec::new()));
    let response = server
        .handle_request(request(Some(json!(1)), "initialize", Some(json!({ "rootUri": "file:///ws" }))))
        .expect("initialize returns a response");
    assert!(response.result.is_some());
    server.handle_request(request(None, "initialized", None));
    assert!(server.is_initialized());
    server
}

/// An initialized server with its index built synchronously from fixture
/// files under `dir`. Uses `test_mark_initialized` instead of sending the
/// real `initialized` notification, since the background scan `initialize`
/// already spawned (against the fake `rootUri` below, which doesn't exist
/// on disk) would otherwise race the synchronous build below over the same
/// index.
fn server_with_fixtures(dir: &std::path::Path) -> Server {
    let mut server = Server::new(Box::new(Vec::new()));
    let response = server
        .handle_request(request(Some(json!(1)), "initialize", Some(json!({ "rootUri": "file:///ws" }))))
        .expect("initialize returns a response");
    assert!(response.result.is_some());
    server.test_mark_initialized();
    server.test_build_index(dir);
    server
}

#[test]
fn s1_did_open_then_document_symbol_lists_class_and_method() {
    let mut server = initialized_server();

    server.handle_request(request(
        None,
        "textDocument/didOpen",
        Some(json!({
            "textDocument": {
                "uri": "file:///t/u.rb",
                "languageId": "ruby",
                "version": 1,
                "text": "class User\n  def full_name\n    \"x\"\n  end\nend\n"
            }
        })),
    ));

    let response = server
        .handle_request(request(
            Some(json!(2)),
            "textDocument/documentSymbol",
            Some(json!({ "textDocument": { "uri": "file:///t/u.rb" } })),
        ))
        .expect("response");

    let symbols = response.result.expect("ok").as_array().expect("array").clone();
    assert_eq!(symbols.len(), 2);
    assert_eq!(symbols[0]["name"], "User");
    assert_eq!(symbols[0]["kind"], 5);
    assert_eq!(symbols[1]["name"], "full_name");
    assert_eq!(symbols[1]["kind"], 6);
}

#[test]
fn s2_incremental_edit_batch_renames_two_methods_in_one_round_trip() {
    let mut server = initialized_server();

    let text = "class User\n  def aaa\n  end\n  def bbb\n  end\nend\n";
    server.handle_request(request(
        None,
        "textDocument/didOpen",
        Some(json!({
            "textDocument": { "uri": "file:///t/u.rb", "languageId": "ruby", "version": 1, "text": text }
        })),
    ));

    // Edits are listed in order of appearance; the server must apply them
    // back to front so the second edit's range is still valid against the
    // buffer as it stood before the first edit shortened or lengthened it.
    server.handle_request(request(
        None,
        "textDocument/didChange",
        Some(json!({
            "textDocument": { "uri": "file:///t/u.rb", "version": 2 },
            "contentChanges": [
                {
                    "range": { "start": { "line": 1, "character": 6 }, "end": { "line": 1, "character": 9 } },
                    "text": "first_method"
                },
                {
                    "range": { "start": { "line": 3, "character": 6 }, "end": { "line": 3, "character": 9 } },
                    "text": "second"
                }
            ]
        })),
    ));

    let response = server
        .handle_request(request(
            Some(json!(9)),
            "textDocument/documentSymbol",
            Some(json!({ "textDocument": { "uri": "file:///t/u.rb" } })),
        ))
        .expect("response");
    let symbols = response.result.expect("ok").as_array().expect("array").clone();
    let names: Vec<&str> = symbols.iter().map(|s| s["name"].as_str().expect("name")).collect();
    assert_eq!(names, vec!["User", "first_method", "second"]);
}

#[test]
fn s3_definition_resolves_constant_via_rails_convention() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_rb(dir.path(), "app/models/user.rb", "class User\nend\n");

    let mut server = server_with_fixtures(dir.path());

    server.handle_request(request(
        None,
        "textDocument/didOpen",
        Some(json!({
            "textDocument": { "uri": "file:///caller.rb", "languageId": "ruby", "version": 1, "text": "u = User.new" }
        })),
    ));

    let response = server
        .handle_request(request(
            Some(json!(3)),
            "textDocument/definition",
            Some(json!({
                "textDocument": { "uri": "file:///caller.rb" },
                "position": { "line": 0, "character": 5 }
            })),
        ))
        .expect("response");

    let locations = response.result.expect("ok").as_array().expect("array").clone();
    assert_eq!(locations.len(), 1);
    assert_eq!(locations[0]["range"]["start"]["line"], 0);
}

#[test]
fn s4_workspace_symbol_search_matches_prefix_across_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_rb(dir.path(), "app/models/user.rb", "class User\n  def full_name\n  end\nend\n");
    write_rb(dir.path(), "app/models/post.rb", "class Post\n  def full_text\n  end\nend\n");

    let mut server = server_with_fixtures(dir.path());

    let response = server
        .handle_request(request(
            Some(json!(4)),
            "workspace/symbol",
            Some(json!({ "query": "full_" })),
        ))
        .expect("response");

    let symbols = response.result.expect("ok").as_array().expect("array").clone();
    assert_eq!(symbols.len(), 2);
}

#[test]
fn s5_completion_offers_matching_prefix() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_rb(dir.path(), "app/models/user.rb", "class User\n  def full_name\n  end\nend\n");

    let mut server = server_with_fixtures(dir.path());

    server.handle_request(request(
        None,
        "textDocument/didOpen",
        Some(json!({
            "textDocument": { "uri": "file:///caller.rb", "languageId": "ruby", "version": 1, "text": "full_" }
        })),
    ));

    let response = server
        .handle_request(request(
            Some(json!(5)),
            "textDocument/completion",
            Some(json!({
                "textDocument": { "uri": "file:///caller.rb" },
                "position": { "line": 0, "character": 5 }
            })),
        ))
        .expect("response");

    let result = response.result.expect("ok");
    let items = result["items"].as_array().expect("array");
    assert!(items.iter().any(|item| item["label"] == "full_name"));
}

#[test]
fn s6_hover_on_association_reports_type_and_target() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_rb(dir.path(), "app/models/user.rb", "class User\n  has_many :posts\nend\n");

    let mut server = server_with_fixtures(dir.path());

    server.handle_request(request(
        None,
        "textDocument/didOpen",
        Some(json!({
            "textDocument": { "uri": "file:///caller.rb", "languageId": "ruby", "version": 1, "text": "has_many :posts" }
        })),
    ));

    let response = server
        .handle_request(request(
            Some(json!(6)),
            "textDocument/hover",
            Some(json!({
                "textDocument": { "uri": "file:///caller.rb" },
                "position": { "line": 0, "character": 11 }
            })),
        ))
        .expect("response");

    let value = response.result.expect("ok")["contents"]["value"].as_str().expect("markdown").to_string();
    assert!(value.contains("association User#posts"));
    assert!(value.contains("Association type: has_many"));
}

#[test]
fn requests_before_initialize_are_refused() {
    let mut server = Server::new(Box::new(Vec::new()));
    let response = server
        .handle_request(request(Some(json!(1)), "textDocument/hover", Some(json!({}))))
        .expect("response");
    assert_eq!(response.error.expect("error").code, ruby_lsp_protocol::error_codes::SERVER_NOT_INITIALIZED);
}

#[test]
fn every_advertised_no_op_capability_gets_a_routed_empty_response() {
    // Every capability capabilities.rs advertises as `true` must be routed
    // to a handler, even the deliberate no-ops, or a real client would hang
    // waiting for a response that never comes.
    let mut server = initialized_server();
    for method in [
        "textDocument/references",
        "textDocument/rename",
        "textDocument/documentHighlight",
        "textDocument/foldingRange",
        "textDocument/codeAction",
    ] {
        let response = server
            .handle_request(request(Some(json!(1)), method, Some(json!({}))))
            .unwrap_or_else(|| panic!("{method} produced no response"));
        assert_eq!(response.result, Some(json!([])), "{method} did not return an empty array");
    }
}

#[test]
fn shutdown_then_exit_refuses_further_requests() {
    let mut server = initialized_server();

    let response = server.handle_request(request(Some(json!(7)), "shutdown", None)).expect("response");
    assert!(response.result.is_some());

    let refused = server
        .handle_request(request(Some(json!(8)), "textDocument/hover", Some(json!({}))))
        .expect("response");
    assert_eq!(refused.error.expect("error").code, ruby_lsp_protocol::error_codes::INVALID_REQUEST);
}
