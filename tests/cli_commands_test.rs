//! Exit codes of the `query` and `convert` commands

use ade_bridge::cli::commands::convert::ConvertArgs;
use ade_bridge::cli::commands::query::QueryArgs;
use ade_bridge::cli::commands::RequestArgs;
use ade_bridge::domain::OperationId;
use std::path::Path;
use tempfile::TempDir;

const CONFIG: &str = r#"
[locations."be.herd".farm-1]
db_type = "exampleDB"
db_url = "db.farm.local"
db_name = "herd"

[queries.exampleDB]
db_client = "postgres"

[queries.exampleDB.operations]
get-animals = "SELECT * FROM ade_animals ORDER BY id OFFSET ':offset' LIMIT ':pageSize'"
"#;

const ROWS: &str = r#"[
  {
    "totalitems": 1,
    "meta.modified": "2023-05-01T10:00:00.000Z",
    "animal.identifier.id": "BE500012345",
    "animal.identifier.scheme": "eu",
    "animal.specie": "Cattle",
    "animal.gender": "Female"
  }
]"#;

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("ade-bridge.toml"), CONFIG).unwrap();
        std::fs::write(dir.path().join("rows.json"), ROWS).unwrap();
        Self { dir }
    }

    fn path(&self, name: &str) -> String {
        Path::new(self.dir.path())
            .join(name)
            .to_string_lossy()
            .to_string()
    }
}

fn request(id: &str, operation: OperationId) -> RequestArgs {
    RequestArgs {
        scheme: "be.herd".to_string(),
        id: id.to_string(),
        operation,
        from: None,
        to: None,
        current_page: None,
        page_size: Some(10),
    }
}

fn convert(fixture: &Fixture, request: RequestArgs, rows: &str) -> ConvertArgs {
    ConvertArgs {
        request,
        rows: fixture.path(rows),
        path: None,
        compact: true,
        strict: false,
    }
}

#[tokio::test]
async fn test_query_renders() {
    let fixture = Fixture::new();
    let args = QueryArgs {
        request: request("farm-1", OperationId::GetAnimals),
    };
    assert_eq!(args.execute(&fixture.path("ade-bridge.toml")).await.unwrap(), 0);
}

#[tokio::test]
async fn test_query_unsupported_operation() {
    let fixture = Fixture::new();
    let args = QueryArgs {
        request: request("farm-1", OperationId::GetMilkingVisits),
    };
    assert_eq!(args.execute(&fixture.path("ade-bridge.toml")).await.unwrap(), 2);
}

#[tokio::test]
async fn test_query_missing_config() {
    let fixture = Fixture::new();
    let args = QueryArgs {
        request: request("farm-1", OperationId::GetAnimals),
    };
    assert_eq!(args.execute(&fixture.path("missing.toml")).await.unwrap(), 2);
}

#[tokio::test]
async fn test_convert_row_dump() {
    let fixture = Fixture::new();
    let args = convert(&fixture, request("farm-1", OperationId::GetAnimals), "rows.json");
    assert_eq!(args.execute(&fixture.path("ade-bridge.toml")).await.unwrap(), 0);
}

#[tokio::test]
async fn test_convert_unknown_location() {
    let fixture = Fixture::new();
    let args = convert(&fixture, request("farm-9", OperationId::GetAnimals), "rows.json");
    assert_eq!(args.execute(&fixture.path("ade-bridge.toml")).await.unwrap(), 2);
}

#[tokio::test]
async fn test_convert_missing_rows_file() {
    let fixture = Fixture::new();
    let args = convert(&fixture, request("farm-1", OperationId::GetAnimals), "absent.json");
    assert_eq!(args.execute(&fixture.path("ade-bridge.toml")).await.unwrap(), 5);
}

#[tokio::test]
async fn test_convert_strict_rejects_incomplete_rows() {
    let fixture = Fixture::new();
    std::fs::write(
        fixture.path("partial.json"),
        r#"[{ "animal.identifier.id": "BE500012345" }]"#,
    )
    .unwrap();

    let lenient = convert(&fixture, request("farm-1", OperationId::GetAnimals), "partial.json");
    assert_eq!(lenient.execute(&fixture.path("ade-bridge.toml")).await.unwrap(), 0);

    let strict = ConvertArgs {
        strict: true,
        ..convert(&fixture, request("farm-1", OperationId::GetAnimals), "partial.json")
    };
    assert_eq!(strict.execute(&fixture.path("ade-bridge.toml")).await.unwrap(), 5);
}
