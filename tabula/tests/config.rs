use tabula::{ColumnId, ConfigError, SortDirection, Table, TableConfig};
use tabula::column::decode_columns;

#[test]
fn test_config_defaults() {
    let config = TableConfig::from_json("{}").unwrap();
    assert_eq!(config, TableConfig::default());
    assert!(config.default_sort_asc);
    assert!(!config.disabled);
}

#[test]
fn test_config_camel_case_keys() {
    let config = TableConfig::from_json(
        r#"{
            "pagination": true,
            "paginationServer": true,
            "persistSelectedOnSort": true,
            "defaultSortFieldId": 3,
            "defaultSortAsc": false
        }"#,
    )
    .unwrap();

    assert!(config.pagination);
    assert!(config.pagination_server);
    assert!(config.persist_selected_on_sort);
    assert_eq!(config.default_sort_field_id, Some(ColumnId::Number(3)));
    assert!(!config.default_sort_asc);
}

#[test]
fn test_invalid_config_json() {
    let err = TableConfig::from_json("{\"pagination\": ").unwrap_err();
    assert!(matches!(err, ConfigError::Json(_)));
}

#[test]
fn test_decoded_table_sorts_by_default_field() {
    let columns = decode_columns(
        r#"[
            {"name": "Name", "id": "name", "sortable": true},
            {"name": "Age", "id": 2, "sortable": true}
        ]"#,
    )
    .unwrap();
    let config =
        TableConfig::from_json(r#"{"defaultSortFieldId": "2", "defaultSortAsc": false}"#).unwrap();
    let table = Table::new(columns, config);

    assert_eq!(
        table.selected_column().map(|c| c.id),
        Some(ColumnId::Number(2))
    );
    assert_eq!(table.sort_direction(), SortDirection::Desc);
}
