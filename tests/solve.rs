use breach_solver::{
    parse_codes, BreachProtocol, BreachProtocolRawData, HexCode, HierarchyConfig, Matrix,
    SearchStrategy, SolverOptions,
};
use rstest::rstest;

fn codes(s: &str) -> Vec<HexCode> {
    parse_codes(s).unwrap()
}

fn raw(grid: &str, daemons: &[&str], buffer_size: usize) -> BreachProtocolRawData {
    BreachProtocolRawData::new(
        codes(grid),
        daemons.iter().map(|d| codes(d)).collect(),
        buffer_size,
    )
}

const GRID_5: &str = "1C 55 BD E9 1C \
                      55 1C 1C 55 7A \
                      E9 BD 55 1C 1C \
                      7A 1C E9 55 BD \
                      1C 7A 55 1C E9";

#[test]
fn factory_order_for_two_daemons() {
    let data = raw(GRID_5, &["1C 1C", "55"], 5);
    let protocol = BreachProtocol::new(&data, SolverOptions::default());
    let values: Vec<Vec<HexCode>> = protocol
        .sequences()
        .map(|sequence| sequence.value().to_vec())
        .collect();
    assert_eq!(
        values,
        vec![codes("1C 1C 55"), codes("55 1C 1C"), codes("55"), codes("1C 1C")]
    );
}

#[rstest]
fn best_result_is_playable(
    #[values(SearchStrategy::Bfs, SearchStrategy::Dfs)] strategy: SearchStrategy,
) {
    let data = raw(GRID_5, &["1C 1C", "55 E9", "BD 7A"], 6);
    let protocol = BreachProtocol::new(&data, SolverOptions::default().with_strategy(strategy));
    let result = protocol.solve().expect("some daemon is solvable");

    assert!(result.path().len() <= data.buffer_size);
    let matrix = Matrix::replay(protocol.grid(), result.path()).unwrap();
    let entered: Vec<HexCode> = matrix.selected_values().collect();
    assert_eq!(entered, result.resolved_sequence().value());
    for part in result.sequence().parts() {
        assert!(
            entered.windows(part.len()).any(|window| window == part.value()),
            "daemon {} not entered",
            part.index()
        );
        assert!(result.resolved_sequence().indexes().contains(&part.index()));
    }
}

#[test]
fn solve_all_is_best_first_and_lazy() {
    let data = raw(GRID_5, &["1C 1C", "55 E9", "BD 7A"], 6);
    let protocol = BreachProtocol::new(&data, SolverOptions::default());
    let mut all = protocol.solve_all();
    let first = all.next().unwrap();
    let second = all.next().unwrap();
    drop(all);
    assert_ne!(first.sequence().value(), second.sequence().value());
    assert_eq!(protocol.solve().unwrap(), first);
}

#[test]
fn types_hierarchy_from_config() {
    let data = raw(GRID_5, &["1C 1C", "55 E9"], 4)
        .with_types(vec!["datamine_v1".into(), "icepick".into()]);
    let options: SolverOptions = serde_json::from_str(
        r#"{"hierarchy":{"kind":"types","priority":["icepick","datamine_v1"]}}"#,
    )
    .unwrap();
    assert_eq!(
        options.hierarchy,
        HierarchyConfig::Types {
            priority: vec!["icepick".into(), "datamine_v1".into()]
        }
    );
    let protocol = BreachProtocol::new(&data, options);
    let result = protocol.solve().unwrap();
    // the pair fits a buffer of 4 through (0, 0) (0, 4) (2, 4) (2, 3)
    assert_eq!(result.sequence().value(), codes("1C 1C 55 E9"));
}

#[test]
fn raw_data_and_result_json() {
    let data: BreachProtocolRawData = serde_json::from_str(
        r#"{
            "grid": ["55", "55", "1C", "55", "1C", "E9", "55", "55", "1C"],
            "daemons": [["55", "55", "E9"]],
            "bufferSize": 5
        }"#,
    )
    .unwrap();
    data.validate().unwrap();
    let protocol = BreachProtocol::new(&data, SolverOptions::default());
    let result = protocol.solve().unwrap();
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["path"], serde_json::json!([[0, 0], [0, 1], [2, 1]]));
    assert_eq!(json["sequence"]["parts"], serde_json::json!([0]));
    assert_eq!(json["resolvedSequence"]["value"], serde_json::json!(["55", "55", "E9"]));
    assert_eq!(json["exitStrategy"]["willExit"], serde_json::json!(false));
}

#[test]
fn unsolvable_puzzle_yields_nothing() {
    let data = raw(GRID_5, &["FF FF"], 6);
    let protocol = BreachProtocol::new(&data, SolverOptions::default());
    assert!(protocol.solve().is_none());
    assert_eq!(protocol.solve_all().count(), 0);

    let data = raw(GRID_5, &["1C 55 BD E9 1C"], 4);
    let protocol = BreachProtocol::new(&data, SolverOptions::default());
    assert_eq!(protocol.sequences().count(), 0);
    assert!(protocol.solve().is_none());
}
