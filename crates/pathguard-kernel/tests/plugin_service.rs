//! End-to-end: a host service decorated through the plugin entry point.

use pathguard_kernel::{
    init, DiagnosticCategory, LanguageService, PluginCreateInfo, SourceService,
    PATH_DIAGNOSTIC_CODE, SYNTAX_DIAGNOSTIC_CODE, TextSpan,
};
use serde_json::json;

const MAIN: &str = r#"import { FilePathStr, FolderPathStr } from "pathguard";

export const config: FilePathStr = "config/app.json";
export const assets: FolderPathStr = "public";
const broken: FilePathStr = "config/missing.json";
"#;

fn project() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("package.json"), "{}").unwrap();
    std::fs::create_dir_all(dir.path().join("config")).unwrap();
    std::fs::write(dir.path().join("config/app.json"), "{}").unwrap();
    std::fs::create_dir(dir.path().join("public")).unwrap();
    dir
}

#[test]
fn decorated_service_reports_only_missing_paths() {
    let dir = project();
    let mut host = SourceService::default();
    host.update_file("src/main.ts", MAIN);

    let service = init()
        .create(PluginCreateInfo::new(host).with_project_dir(dir.path()))
        .unwrap();

    let diags = service.semantic_diagnostics("src/main.ts");
    assert_eq!(diags.len(), 1, "{diags:?}");

    let d = &diags[0];
    assert_eq!(d.code, PATH_DIAGNOSTIC_CODE);
    assert_eq!(d.category, DiagnosticCategory::Error);
    assert_eq!(
        d.message,
        "Invalid path: \"config/missing.json\" does not exist or is not accessible"
    );
    assert_eq!(d.file_name.as_deref(), Some("src/main.ts"));

    let span = d.span.unwrap();
    assert_eq!(&MAIN[span.start..span.end()], "\"config/missing.json\"");
    assert_eq!(d.line_col(MAIN).map(|lc| lc.line), Some(5));
}

#[test]
fn syntactic_diagnostics_delegate() {
    let dir = project();
    let mut host = SourceService::default();
    // U+00A0 is whitespace to the lexer's catch-all but not skipped
    host.update_file("bad.ts", "const\u{a0}a = 1;");

    let service = init()
        .create(
            PluginCreateInfo::new(host)
                .with_project_dir(dir.path())
                .with_config(json!({"severity": "off"})),
        )
        .unwrap();

    let syntax = service.syntactic_diagnostics("bad.ts");
    assert_eq!(syntax.len(), 1, "{syntax:?}");
    let d = &syntax[0];
    assert_eq!(d.code, SYNTAX_DIAGNOSTIC_CODE);
    assert_eq!(d.category, DiagnosticCategory::Error);
    assert_eq!(d.file_name.as_deref(), Some("bad.ts"));
    assert_eq!(d.span, Some(TextSpan::new(5, 2)));

    assert_eq!(syntax, service.inner().syntactic_diagnostics("bad.ts"));
    assert!(service.semantic_diagnostics("bad.ts").is_empty());
    assert_eq!(service.file_names(), vec!["bad.ts".to_string()]);
}
