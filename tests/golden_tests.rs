// Golden-output tests: every tests/golden/NAME.rl must print exactly NAME.ast

use std::fs;
use std::path::Path;

use rill::constants::SOURCE_EXTENSION;
use rill::parser::{parse_source, AstPrinter};
use walkdir::WalkDir;

#[test]
fn golden_dumps_match() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/golden");
    let printer = AstPrinter::new();
    let mut count = 0;

    for entry in WalkDir::new(&root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.path().extension().is_some_and(|ext| ext == SOURCE_EXTENSION))
    {
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        let expected_path = path.with_extension("ast");
        let expected = fs::read_to_string(&expected_path)
            .unwrap_or_else(|e| panic!("Failed to read {expected_path:?}: {e}"));

        let program = parse_source(&source).unwrap_or_else(|e| panic!("{path:?}:\n{e}"));
        let actual = printer.render_program(&program);

        assert_eq!(actual, expected, "dump mismatch for {path:?}");
        count += 1;
    }

    assert!(count >= 4, "expected golden files under {root:?}, found {count}");
}
