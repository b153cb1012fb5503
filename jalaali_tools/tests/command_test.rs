// Runs the commands the way main does, from parsed arguments to rendered text

#[cfg(test)]
mod command_tests {
    use std::fs;

    use clap::Parser;
    use serde_json::{json, Value};

    use jalaali_tools::{
        cli::Cli,
        commands::{self, convert_records, CommandOutput},
        config::{ToolConfig, DEFAULT_INVALID_MESSAGE},
        error::ToolError,
    };

    fn run_args(args: &[&str]) -> (Result<CommandOutput, ToolError>, ToolConfig) {
        let cli = Cli::try_parse_from(std::iter::once("jalaali_tools").chain(args.iter().copied()))
            .unwrap();
        let config = ToolConfig::resolve(&cli).unwrap();
        (commands::run(&cli.command), config)
    }

    fn records(value: Value) -> Vec<serde_json::Map<String, Value>> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn to_gregorian_prints_iso_date() {
        let (result, config) = run_args(&["to-gregorian", "1403/1/15"]);
        assert_eq!(result.unwrap().render(&config).unwrap(), "2024-04-03");
    }

    #[test]
    fn to_gregorian_accepts_persian_digits() {
        let (result, config) = run_args(&["to-gregorian", "۱۴۰۳/۰۱/۱۵"]);
        assert_eq!(result.unwrap().render(&config).unwrap(), "2024-04-03");
    }

    #[test]
    fn invalid_entry_gets_localized_message() {
        let (result, config) = run_args(&["to-gregorian", "1403/13/01"]);
        let err = result.unwrap_err();
        assert!(matches!(err, ToolError::InvalidDate(_)));
        assert_eq!(
            err.user_message(&config),
            format!("{DEFAULT_INVALID_MESSAGE}: 1403/13/01")
        );
    }

    #[test]
    fn month_commands() {
        let (result, config) = run_args(&["to-gregorian-month", "1403/10"]);
        assert_eq!(result.unwrap().render(&config).unwrap(), "2025-01");

        let (result, config) = run_args(&["to-jalaali-month", "2025-01"]);
        assert_eq!(result.unwrap().render(&config).unwrap(), "1403/10");

        let (result, config) = run_args(&["month-range", "1403/12"]);
        assert_eq!(result.unwrap().render(&config).unwrap(), "2025-02-19 2025-03-20");
    }

    #[test]
    fn display_never_fails() {
        let (result, config) = run_args(&["to-jalaali", "legacy value"]);
        assert_eq!(result.unwrap().render(&config).unwrap(), "legacy value");

        let (result, config) = run_args(&["to-jalaali-month", "13/2024"]);
        assert_eq!(result.unwrap().render(&config).unwrap(), "13/2024");
    }

    #[test]
    fn persian_digits_only_touch_jalaali_output() {
        let (result, config) = run_args(&["--persian-digits", "to-jalaali", "2024-04-03"]);
        assert_eq!(result.unwrap().render(&config).unwrap(), "۱۴۰۳/۰۱/۱۵");

        let (result, config) = run_args(&["--persian-digits", "to-gregorian", "1403/01/15"]);
        assert_eq!(result.unwrap().render(&config).unwrap(), "2024-04-03");
    }

    #[test]
    fn json_output() {
        let (result, config) = run_args(&["to-jalaali", "2024-04-03", "--json"]);
        let rendered: Value =
            serde_json::from_str(&result.unwrap().render(&config).unwrap()).unwrap();
        assert_eq!(
            rendered,
            json!({
                "kind": "converted",
                "input": "2024-04-03",
                "output": "1403/01/15",
                "calendar": "jalaali"
            })
        );
    }

    #[test]
    fn batch_without_out_prints_records() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("rent.json");
        fs::write(&input, r#"[{ "date": "1403/12/30" }]"#).unwrap();

        let (result, config) = run_args(&["convert-file", input.to_str().unwrap()]);
        let rendered = result.unwrap().render(&config).unwrap();
        let printed: Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(printed, json!([{ "date": "1403/12/30", "gregorian": "2025-03-20" }]));

        let (result, config) = run_args(&["--json", "convert-file", input.to_str().unwrap()]);
        let rendered: Value =
            serde_json::from_str(&result.unwrap().render(&config).unwrap()).unwrap();
        assert_eq!(rendered["kind"], "batch");
        assert_eq!(rendered["converted"], 1);
        assert_eq!(rendered["records"][0]["gregorian"], "2025-03-20");
    }

    #[test]
    fn convert_records_adds_target_field() {
        let input = records(json!([
            { "id": 1, "date": "1403/01/15", "amount": 1200 },
            { "id": 2, "date": "1402/12/29" }
        ]));
        let output = convert_records(input, "date", "gregorian").unwrap();
        assert_eq!(output[0]["gregorian"], "2024-04-03");
        assert_eq!(output[0]["amount"], 1200);
        assert_eq!(output[1]["gregorian"], "2024-03-19");
    }

    #[test]
    fn convert_records_reports_every_bad_row() {
        let input = records(json!([
            { "date": "1403/01/15" },
            { "date": "1402/12/30" },
            { "other": "x" },
            { "date": 14030115 }
        ]));
        let err = convert_records(input, "date", "gregorian").unwrap_err();
        let bad = match err {
            ToolError::InvalidRecords(bad) => bad,
            other => panic!("expected InvalidRecords, got {other:?}"),
        };
        let indexes: Vec<usize> = bad.iter().map(|record| record.index).collect();
        assert_eq!(indexes, vec![1, 2, 3]);
        assert_eq!(bad[0].value, "1402/12/30");
        assert_eq!(bad[1].value, "<missing date>");
        assert_eq!(bad[2].value, "14030115");
    }

    #[test]
    fn convert_file_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("bills.json");
        let out = dir.path().join("bills.out.json");
        fs::write(&input, r#"[{ "date": "1403/06/31" }, { "date": "1403/07/01" }]"#).unwrap();

        let (result, config) = run_args(&[
            "convert-file",
            input.to_str().unwrap(),
            "--out",
            out.to_str().unwrap(),
        ]);
        let rendered = result.unwrap().render(&config).unwrap();
        assert!(rendered.starts_with("2 record(s) written to"));

        let written: Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(written[0]["gregorian"], "2024-09-21");
        assert_eq!(written[1]["gregorian"], "2024-09-22");
    }

    #[test]
    fn rejected_batch_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("salaries.json");
        let out = dir.path().join("salaries.out.json");
        fs::write(&input, r#"[{ "paidOn": "1403/01/01" }, { "paidOn": "1403/1/32" }]"#).unwrap();

        let (result, config) = run_args(&[
            "convert-file",
            input.to_str().unwrap(),
            "--field",
            "paidOn",
            "--out",
            out.to_str().unwrap(),
        ]);
        let err = result.unwrap_err();
        assert!(err.user_message(&config).contains("#1: 1403/1/32"));
        assert!(!out.exists());
    }

    #[test]
    fn convert_file_rejects_non_array() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("broken.json");
        fs::write(&input, r#"{ "date": "1403/01/01" }"#).unwrap();

        let (result, _) = run_args(&["convert-file", input.to_str().unwrap()]);
        assert!(matches!(result, Err(ToolError::Json { .. })));
    }
}
