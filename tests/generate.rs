use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::{Local, TimeZone};
use srcmap::{FileEntry, GeneratorConfig, SourceMap, TreeNode};
use tempfile::TempDir;

fn write_file(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn config_with(descriptions: &[(&str, &str)]) -> GeneratorConfig {
    GeneratorConfig {
        project_name: Some("Demo".to_string()),
        descriptions: descriptions
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<BTreeMap<_, _>>(),
        ..GeneratorConfig::default()
    }
}

fn generate(root: &Path, config: GeneratorConfig) -> String {
    SourceMap::new(root)
        .config(config)
        .generated_at(Local.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap())
        .build()
        .unwrap()
        .document
        .text()
}

fn modules_section(doc: &str) -> &str {
    let start = doc.find("## Modules").unwrap();
    let end = doc.rfind("\n---\n").unwrap();
    &doc[start..end]
}

fn structure_section(doc: &str) -> &str {
    let heading = "## Project Structure\n\n```\n";
    let start = doc.find(heading).unwrap() + heading.len();
    let end = doc[start..].find("\n```").unwrap() + start;
    &doc[start..end]
}

#[test]
fn entry_point_and_empty_directory_scenario() {
    let dir = TempDir::new().unwrap();
    write_file(
        &dir.path().join("src/main.rs"),
        "// comment one\nfn main() {\n    // comment two\n    run();\n}\n",
    );
    fs::create_dir_all(dir.path().join("src/util")).unwrap();

    let doc = generate(dir.path(), config_with(&[("main.rs", "Entry point")]));

    assert!(doc.contains("- **Total Files**: 1\n"));
    assert!(doc.contains("- **Total Lines**: 3\n"));
    assert!(doc.contains("## Entry Point\n\n- **[main.rs](main.rs)** – `3 lines` – Entry point"));
    assert!(modules_section(&doc).contains("### util/\n\n*No files in this directory.*"));
}

#[test]
fn files_without_descriptions_render_bare() {
    let dir = TempDir::new().unwrap();
    write_file(&dir.path().join("src/sub/b.rs"), "fn b() {}\nfn bb() {}\n");
    write_file(&dir.path().join("src/sub/a.rs"), "fn a() {}\n");

    let doc = generate(dir.path(), config_with(&[]));
    let modules = modules_section(&doc);

    let a = "- **[a.rs](sub/a.rs)** – `1 LoEC (Lines of Executable Code)`\n";
    let b = "- **[b.rs](sub/b.rs)** – `2 LoEC (Lines of Executable Code)`\n";
    let a_at = modules.find(a).unwrap();
    let b_at = modules.find(b).unwrap();
    assert!(a_at < b_at);
    assert!(!modules.contains("No description available."));
}

#[test]
fn described_files_render_exact_description() {
    let dir = TempDir::new().unwrap();
    write_file(&dir.path().join("src/fs/dir.rs"), "fn d() {}\n");

    let doc = generate(
        dir.path(),
        config_with(&[("fs", "Filesystem code."), ("fs/dir.rs", "Directory `walk` helpers.")]),
    );
    assert!(doc.contains("### fs/ – Filesystem code.\n"));
    assert!(doc.contains(
        "- **[dir.rs](fs/dir.rs)** – `1 LoEC (Lines of Executable Code)` – Directory `walk` helpers.\n"
    ));
}

#[test]
fn excluded_names_never_appear() {
    let dir = TempDir::new().unwrap();
    write_file(&dir.path().join("src/lib.rs"), "fn l() {}\n");
    write_file(&dir.path().join("src/.cache/deep/hidden.rs"), "fn h() {}\n");
    write_file(&dir.path().join("src/core/target/gen/out.rs"), "fn o() {}\n");
    write_file(&dir.path().join("src/core/node_modules/x.rs"), "fn x() {}\n");
    write_file(&dir.path().join("src/core/__pycache__/y.rs"), "fn y() {}\n");
    write_file(&dir.path().join("src/core/.hidden.rs"), "fn z() {}\n");
    write_file(&dir.path().join("src/core/kept.rs"), "fn k() {}\n");

    let doc = generate(dir.path(), config_with(&[]));

    for name in [".cache", "hidden.rs", "target", "out.rs", "node_modules", "__pycache__", ".hidden.rs"] {
        assert!(!doc.contains(name), "{name} leaked into the document");
    }
    assert!(doc.contains("kept.rs"));
    assert!(doc.contains("- **Total Files**: 2\n"));
}

#[test]
fn only_qualifying_files_count() {
    let dir = TempDir::new().unwrap();
    write_file(&dir.path().join("src/lib.rs"), "fn l() {}\n");
    write_file(&dir.path().join("src/notes.txt"), "a\nb\nc\n");
    write_file(&dir.path().join("src/data/table.csv"), "1,2\n3,4\n");
    write_file(&dir.path().join("src/data/CHANGELOG.md"), "# Changes\n");
    write_file(&dir.path().join("src/README.md"), "# Old map\n\nbody\n");

    let result = SourceMap::new(dir.path()).config(config_with(&[])).build().unwrap();
    let doc = result.document.text();

    assert_eq!(result.total_files(), 2);
    assert_eq!(result.total_lines(), 3);
    assert!(!doc.contains("notes.txt"));
    assert!(!doc.contains("table.csv"));
    assert!(!doc.contains("CHANGELOG.md"));
    assert!(structure_section(&doc).contains("├── data/\n"));
    assert!(modules_section(&doc).contains("### data/\n\n*No files in this directory.*"));
}

fn collect_entries<'a>(node: &'a TreeNode, out: &mut Vec<&'a FileEntry>) {
    out.extend(node.files());
    for (_, child) in node.dirs() {
        collect_entries(child, out);
    }
}

#[test]
fn totals_match_sum_of_entries() {
    let dir = TempDir::new().unwrap();
    write_file(&dir.path().join("src/main.rs"), "fn main() {}\n// c\n");
    write_file(&dir.path().join("src/a/one.rs"), "1;\n2;\n");
    write_file(&dir.path().join("src/a/b/two.rs"), "1;\n2;\n3;\n");
    write_file(&dir.path().join("src/a/b/c/three.rs"), "// only comment\n");
    write_file(&dir.path().join("src/z/four.rs"), "1;\n2;\n3;\n4;\n");

    let result = SourceMap::new(dir.path()).config(config_with(&[])).build().unwrap();

    let mut entries = Vec::new();
    collect_entries(&result.tree, &mut entries);
    assert_eq!(result.total_files(), entries.len());
    assert_eq!(result.total_lines(), entries.iter().map(|e| e.lines).sum::<usize>());
    assert_eq!(result.total_files(), 5);
    assert_eq!(result.total_lines(), 10);

    let doc = result.document.text();
    assert!(doc.contains("- **Total Files**: 5\n"));
    assert!(doc.contains("- **Total Lines**: 10\n"));
    assert!(doc.contains("- **[three.rs](a/b/c/three.rs)** – `0 LoEC (Lines of Executable Code)`"));
}

#[test]
fn directories_before_files_at_every_level() {
    let dir = TempDir::new().unwrap();
    write_file(&dir.path().join("src/aaa.rs"), "x;\n");
    write_file(&dir.path().join("src/zdir/m.rs"), "x;\n");
    write_file(&dir.path().join("src/zdir/a.rs"), "x;\n");
    write_file(&dir.path().join("src/zdir/sub/q.rs"), "x;\n");
    write_file(&dir.path().join("src/bdir/k.rs"), "x;\n");

    let doc = generate(dir.path(), config_with(&[]));

    let structure = structure_section(&doc);
    assert!(structure.ends_with(
        "src/\n\
├── bdir/\n\
│   ╰── k.rs\n\
├── zdir/\n\
│   ├── sub/\n\
│   │   ╰── q.rs\n\
│   ├── a.rs\n\
│   ╰── m.rs\n\
╰── aaa.rs"
    ));

    let modules = modules_section(&doc);
    let order: Vec<usize> = ["### bdir/", "### zdir/", "[a.rs]", "[m.rs]", "#### sub/", "[q.rs]"]
        .iter()
        .map(|needle| modules.find(needle).unwrap())
        .collect();
    assert!(order.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn repeated_runs_differ_only_in_timestamp() {
    let dir = TempDir::new().unwrap();
    write_file(&dir.path().join("src/main.rs"), "fn main() {}\n");
    write_file(&dir.path().join("src/cli/args.rs"), "pub struct Args;\n");

    let run = |hour: u32| {
        let result = SourceMap::new(dir.path())
            .config(config_with(&[]))
            .generated_at(Local.with_ymd_and_hms(2024, 6, 1, hour, 0, 0).unwrap())
            .build()
            .unwrap();
        result.write().unwrap();
        fs::read_to_string(&result.output_path).unwrap()
    };

    // README.md is scanned too: the first run creates it and the second
    // adds its own tree line, after which the output is stable.
    run(8);
    run(9);
    let third = run(10);
    let fourth = run(11);

    assert_ne!(third, fourth);
    let strip = |doc: &str| {
        doc.lines()
            .filter(|l| !l.starts_with("*Generated by"))
            .collect::<Vec<_>>()
            .join("\n")
    };
    assert_eq!(strip(&third), strip(&fourth));
    assert!(third.contains("├── README.md"));
}
