//! Tests for the command operations
//!
//! Each test scripts a stub server and checks both the decoded result and
//! the exact command lines that went over the wire.

#[path = "../common/mod.rs"]
mod common;

use common::{reply, StubServer, BANNER};
use dictlink::client::auth_digest;
use dictlink::protocol::{Body, StatusCode};
use dictlink::{Connection, ALL_DATABASES, DEFAULT_STRATEGY, FIRST_DATABASE};

// =============================================================================
// Helper Functions
// =============================================================================

fn connect(server: &StubServer) -> Connection {
    Connection::connect(&["127.0.0.1"], server.port(), false, false).unwrap()
}

// =============================================================================
// DEFINE Tests
// =============================================================================

#[test]
fn test_define_returns_each_definition() {
    let server = StubServer::start(vec![(
        "DEFINE * \"ruby\"",
        reply(&[
            "150 2 definitions retrieved",
            "151 \"ruby\" wn \"WordNet (r) 3.0 (2006)\"",
            "ruby",
            "    n 1: a transparent deep red variety of corundum",
            ".",
            "151 \"Ruby\" foldoc \"The Free On-line Dictionary of Computing\"",
            "Ruby",
            "",
            "   A dynamically typed object-oriented language.",
            ".",
            "250 ok [d/m/c = 2/0/24; 0.000r 0.000u 0.000s]",
        ]),
    )]);

    let mut conn = connect(&server);
    let definitions = conn.define(ALL_DATABASES, "ruby").unwrap().expect("definitions");

    assert_eq!(definitions.len(), 2);
    assert_eq!(definitions[0].word, "ruby");
    assert_eq!(definitions[0].database, "wn");
    assert_eq!(definitions[0].description, "WordNet (r) 3.0 (2006)");
    assert_eq!(definitions[0].lines.len(), 2);

    assert_eq!(definitions[1].word, "ruby");
    assert_eq!(definitions[1].database, "foldoc");
    assert_eq!(
        definitions[1].lines,
        vec!["Ruby", "", "   A dynamically typed object-oriented language."]
    );

    conn.disconnect().unwrap();
    assert_eq!(server.finish(), vec!["DEFINE * \"ruby\"", "QUIT"]);
}

#[test]
fn test_define_keeps_requested_spelling() {
    let server = StubServer::start(vec![(
        "DEFINE wn \"Apple\"",
        reply(&[
            "150 2 definitions retrieved",
            "151 \"apple\" wn \"WordNet (r) 3.0 (2006)\"",
            "apple",
            "    n 1: fruit with red or yellow or green skin",
            ".",
            "151 \"apple\" wn \"WordNet (r) 3.0 (2006)\"",
            "apple",
            "    n 2: native Eurasian tree widely cultivated",
            ".",
            "250 ok",
        ]),
    )]);

    let mut conn = connect(&server);
    let definitions = conn.define("wn", "Apple").unwrap().expect("definitions");

    assert_eq!(
        definitions.iter().map(|d| d.word.as_str()).collect::<Vec<_>>(),
        vec!["Apple", "Apple"]
    );
    assert_eq!(definitions[1].lines[0], "apple");

    conn.disconnect().unwrap();
    server.finish();
}

#[test]
fn test_define_no_match_is_failure_indicator() {
    let server = StubServer::start(vec![(
        "DEFINE wn \"qwxz\"",
        reply(&["552 no match [d/m/c = 0/0/0; 0.000r 0.000u 0.000s]"]),
    )]);

    let mut conn = connect(&server);
    assert_eq!(conn.define("wn", "qwxz").unwrap(), None);
    assert_eq!(conn.code(), Some(StatusCode::NO_MATCH));

    // The connection is still usable afterwards
    conn.disconnect().unwrap();
    server.finish();
}

#[test]
fn test_define_ok_without_definitions_is_empty_not_failure() {
    let server = StubServer::start(vec![("DEFINE wn \"none\"", reply(&["250 ok"]))]);

    let mut conn = connect(&server);
    assert_eq!(conn.define("wn", "none").unwrap(), Some(vec![]));

    conn.disconnect().unwrap();
    server.finish();
}

#[test]
fn test_define_invalid_database() {
    let server = StubServer::start(vec![(
        "DEFINE nosuchdb \"word\"",
        reply(&["550 invalid database, use \"SHOW DB\" for list of databases"]),
    )]);

    let mut conn = connect(&server);
    assert!(conn.define("nosuchdb", "word").unwrap().is_none());
    assert_eq!(conn.code(), Some(StatusCode::INVALID_DATABASE));

    conn.disconnect().unwrap();
    server.finish();
}

// =============================================================================
// MATCH Tests
// =============================================================================

#[test]
fn test_match_groups_by_database_in_order() {
    let server = StubServer::start(vec![(
        "MATCH * prefix \"ab\"",
        reply(&[
            "152 5 matches found",
            "wn \"abaca\"",
            "gcide \"Ab\"",
            "wn \"abacus\"",
            "gcide \"Aback\"",
            "wn \"abandon\"",
            ".",
            "250 ok",
        ]),
    )]);

    let mut conn = connect(&server);
    let matches = conn
        .match_word(ALL_DATABASES, "prefix", "ab")
        .unwrap()
        .expect("matches");

    assert_eq!(matches.len(), 2);
    assert_eq!(matches.databases().collect::<Vec<_>>(), vec!["wn", "gcide"]);
    assert_eq!(
        matches.get("wn").unwrap(),
        &["abaca".to_string(), "abacus".to_string(), "abandon".to_string()]
    );
    assert_eq!(
        matches.get("gcide").unwrap(),
        &["Ab".to_string(), "Aback".to_string()]
    );
    assert_eq!(matches.words().count(), 5);

    conn.disconnect().unwrap();
    server.finish();
}

#[test]
fn test_match_no_match_is_failure_indicator() {
    let server = StubServer::start(vec![(
        "MATCH ! . \"zzzzzz\"",
        reply(&["552 no match"]),
    )]);

    let mut conn = connect(&server);
    assert!(conn
        .match_word(FIRST_DATABASE, DEFAULT_STRATEGY, "zzzzzz")
        .unwrap()
        .is_none());

    conn.disconnect().unwrap();
    server.finish();
}

#[test]
fn test_match_unstuffs_leading_dots_only() {
    let server = StubServer::start(vec![(
        "MATCH * prefix \".ne\"",
        reply(&[
            "152 2 matches found",
            "..local \".net\"",
            "foldoc \"..net\"",
            ".",
            "250 ok",
        ]),
    )]);

    let mut conn = connect(&server);
    let matches = conn.match_word(ALL_DATABASES, "prefix", ".ne").unwrap().unwrap();

    // Stuffed line start is undone; dots inside the quotes are content
    assert_eq!(matches.databases().collect::<Vec<_>>(), vec![".local", "foldoc"]);
    assert_eq!(matches.get(".local").unwrap(), &[".net".to_string()]);
    assert_eq!(matches.get("foldoc").unwrap(), &["..net".to_string()]);

    conn.disconnect().unwrap();
    server.finish();
}

// =============================================================================
// SHOW Tests
// =============================================================================

#[test]
fn test_show_db_is_pair_body() {
    let server = StubServer::start(vec![(
        "SHOW DB",
        reply(&[
            "110 2 databases present",
            "wn \"WordNet (r) 3.0 (2006)\"",
            "foldoc \"The Free On-line Dictionary of Computing (30 December 2018)\"",
            ".",
            "250 ok",
        ]),
    )]);

    let mut conn = connect(&server);
    let databases = conn
        .show_db()
        .unwrap()
        .and_then(|body| body.to_single_pairs())
        .expect("database list");

    assert_eq!(databases.len(), 2);
    assert_eq!(databases["wn"], "WordNet (r) 3.0 (2006)");

    conn.disconnect().unwrap();
    server.finish();
}

#[test]
fn test_show_strat_is_pair_body() {
    let server = StubServer::start(vec![(
        "SHOW STRAT",
        reply(&[
            "111 3 strategies present",
            "exact \"Match headwords exactly\"",
            "prefix \"Match prefixes\"",
            "re \"POSIX 1003.2 (modern) regular expressions\"",
            ".",
            "250 ok",
        ]),
    )]);

    let mut conn = connect(&server);
    let body = conn.show_strat().unwrap().expect("strategies");
    let pairs = body.as_pairs().expect("pair body");
    assert_eq!(
        pairs.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["exact", "prefix", "re"]
    );

    conn.disconnect().unwrap();
    server.finish();
}

#[test]
fn test_show_info_is_text_body() {
    let server = StubServer::start(vec![(
        "SHOW INFO wn",
        reply(&[
            "112 database information follows",
            "============ wn ============",
            "00-database-info",
            "..dotted line",
            ".",
            "250 ok",
        ]),
    )]);

    let mut conn = connect(&server);
    let body = conn.show_info("wn").unwrap().expect("info");
    assert_eq!(
        body,
        Body::Text("============ wn ============\n00-database-info\n.dotted line\n".into())
    );

    conn.disconnect().unwrap();
    server.finish();
}

#[test]
fn test_show_info_invalid_database() {
    let server = StubServer::start(vec![("SHOW INFO nope", reply(&["550 invalid database"]))]);

    let mut conn = connect(&server);
    assert_eq!(conn.show_info("nope").unwrap(), None);

    conn.disconnect().unwrap();
    server.finish();
}

#[test]
fn test_show_server_and_help_are_text() {
    let server = StubServer::start(vec![
        (
            "SHOW SERVER",
            reply(&["114 server information", "dictd 1.12.1 on Linux", ".", "250 ok"]),
        ),
        (
            "HELP",
            reply(&[
                "113 help text follows",
                "DEFINE database word         -- look up word in database",
                "QUIT                         -- exit",
                ".",
                "250 ok",
            ]),
        ),
    ]);

    let mut conn = connect(&server);
    let server_info = conn.show_server().unwrap().expect("server info");
    assert_eq!(server_info.as_text(), Some("dictd 1.12.1 on Linux\n"));

    let help = conn.help().unwrap().expect("help");
    let text = help.as_text().expect("text body");
    assert_eq!(text.lines().count(), 2);
    assert!(text.starts_with("DEFINE database word"));

    conn.disconnect().unwrap();
    assert_eq!(server.finish(), vec!["SHOW SERVER", "HELP", "QUIT"]);
}

// =============================================================================
// Scalar Operation Tests
// =============================================================================

#[test]
fn test_status_returns_message() {
    let server = StubServer::start(vec![(
        "STATUS",
        reply(&["210 status [d/m/c = 0/0/0; 12.000r 0.000u 0.000s]"]),
    )]);

    let mut conn = connect(&server);
    assert_eq!(
        conn.status().unwrap(),
        "status [d/m/c = 0/0/0; 12.000r 0.000u 0.000s]"
    );
    assert_eq!(conn.code(), Some(StatusCode::STATUS_RESPONSE));

    conn.disconnect().unwrap();
    server.finish();
}

#[test]
fn test_client_sends_identification() {
    let server = StubServer::start(vec![("CLIENT dictlink tests", reply(&["250 ok"]))]);

    let mut conn = connect(&server);
    let status = conn.client("dictlink tests").unwrap();
    assert_eq!(status.code, StatusCode::OK);

    conn.disconnect().unwrap();
    assert_eq!(server.finish(), vec!["CLIENT dictlink tests", "QUIT"]);
}

#[test]
fn test_auth_digest_known_value() {
    // md5("<1@host>secret")
    let digest = auth_digest("<1@host>", "secret");
    assert_eq!(digest.len(), 32);
    assert!(digest.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    assert_eq!(auth_digest("", ""), "d41d8cd98f00b204e9800998ecf8427e");
    assert_eq!(auth_digest("", "abc"), "900150983cd24fb0d6963f7d28e17f72");
    assert_eq!(auth_digest("a", "bc"), auth_digest("", "abc"));
}

#[test]
fn test_auth_sends_digest_not_secret() {
    let msgid = "<100.200.300@stub.example.org>";
    assert!(BANNER.ends_with(msgid));
    let expected = format!("AUTH joe {}", auth_digest(msgid, "s3cret"));

    let server = StubServer::start(vec![(
        expected.as_str(),
        reply(&["230 authentication successful"]),
    )]);

    let mut conn = connect(&server);
    let status = conn.auth("joe", "s3cret").unwrap();
    assert_eq!(status.code, StatusCode::AUTHENTICATION_SUCCESSFUL);

    conn.disconnect().unwrap();
    let received = server.finish();
    assert_eq!(received[0], expected);
    assert!(received.iter().all(|line| !line.contains("s3cret")));
}

#[test]
fn test_auth_denied_is_status_not_error() {
    let server = StubServer::start(vec![]);

    let mut conn = connect(&server);
    // Unscripted: the stub answers 500
    let status = conn.auth("joe", "wrong").unwrap();
    assert!(status.is_error());

    conn.disconnect().unwrap();
    server.finish();
}
