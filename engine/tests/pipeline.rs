// End-to-end run over a temporary data folder laid out like the dashboard's.
use engine::config::settings::EngineSettings;
use engine::services::AuditService;
use engine::SkipReason;
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_sheet(path: &Path, headers: &[&str], rows: &[Vec<&str>]) {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string(0, col as u16, *header).unwrap();
    }
    for (r, row) in rows.iter().enumerate() {
        for (col, value) in row.iter().enumerate() {
            sheet.write_string(r as u32 + 1, col as u16, *value).unwrap();
        }
    }
    workbook.save(path).unwrap();
}

fn build_data_root() -> TempDir {
    let root = TempDir::new().unwrap();
    let personnel = root.path().join("dados_gastos");
    fs::create_dir(&personnel).unwrap();

    write_sheet(
        &personnel.join("marco_2024.xlsx"),
        &["Nome", "Cargo", "Líquido"],
        &[
            vec!["HELENA MENEZES PRADO", "SECRETÁRIA DE SAÚDE", "R$ 9.500,00"],
            vec!["CARLOS EDUARDO TAVARES", "SECRETÁRIO DE OBRAS", "R$ 8.700,00"],
            vec!["RICARDO PRADO", "MOTORISTA", "R$ 2.100,00"],
            vec!["JOANA SILVA", "PROFESSORA", "R$ 3.400,00"],
            vec!["PEDRO COSTA", "PROFESSOR", "-"],
        ],
    );
    // Same people a month later; the net column was renamed, so the whole file is left out.
    write_sheet(
        &personnel.join("abril_2024.xlsx"),
        &["Nome", "Cargo", "Valor Líquido"],
        &[vec!["HELENA MENEZES PRADO", "SECRETÁRIA DE SAÚDE", "R$ 9.500,00"]],
    );
    fs::write(personnel.join("LEIAME.txt"), "folhas de pagamento").unwrap();

    write_sheet(
        &root.path().join("dados_viagens.xlsx"),
        &["Favorecido", "Saída", "Chegada", "Destino", "Valor"],
        &[
            vec!["HELENA MENEZES PRADO", "04/03/2024", "06/03/2024", "BRASÍLIA", "R$ 1.800,00"],
            vec!["CARLOS EDUARDO TAVARES", "10/03/2024", "10/03/2024", "ARACAJU", "R$ 250,00"],
            vec!["RICARDO PRADO", "01/01/2024", "28/02/2024", "SALVADOR", "R$ 5.000,00"],
        ],
    );

    let mut workbook = Workbook::new();
    let date_format = Format::new().set_num_format("dd/mm/yyyy");
    let sheet = workbook.add_worksheet();
    for (col, header) in ["Data", "Credor", "Empenhado", "Pago"].iter().enumerate() {
        sheet.write_string(0, col as u16, *header).unwrap();
    }
    let payees = [
        ("AUTO POSTO PRADO LTDA", 12000.0, 11000.0),
        ("TAVARES CONSTRUTORA EIRELI", 50000.0, 42000.0),
        ("ACOSTADO COMERCIO", 300.0, 300.0),
        ("FARMÁCIA MENEZES", 900.0, 850.5),
    ];
    for (i, (payee, committed, paid)) in payees.iter().enumerate() {
        let row = i as u32 + 1;
        let date = ExcelDateTime::from_ymd(2024, 3, row as u8 + 1).unwrap();
        sheet.write_datetime_with_format(row, 0, &date, &date_format).unwrap();
        sheet.write_string(row, 1, *payee).unwrap();
        sheet.write_number(row, 2, *committed).unwrap();
        sheet.write_number(row, 3, *paid).unwrap();
    }
    workbook.save(root.path().join("gastos_gerais.xlsx")).unwrap();

    root
}

#[test]
fn loads_every_section_and_reports_skips() {
    let root = build_data_root();
    let service = AuditService::new(EngineSettings::default().with_data_root(root.path())).unwrap();
    let datasets = service.load_all().unwrap();

    assert_eq!(datasets.personnel.len(), 4);
    assert!(datasets.personnel.records.iter().all(|r| r.month() == 3 && r.year() == 2024));
    assert_eq!(datasets.personnel.skipped_count(), 1);
    match &datasets.personnel.skipped[0].reason {
        SkipReason::MissingColumns(missing) => assert_eq!(missing, &vec!["Líquido".to_string()]),
        other => panic!("unexpected skip reason: {:?}", other),
    }

    // The 59-day trip exceeds the 30-day cap.
    assert_eq!(datasets.travel.len(), 2);
    assert_eq!(datasets.expenditures.len(), 4);
    assert_eq!(datasets.skipped_count(), 1);
}

#[test]
fn secretary_links_to_staff_and_payees() {
    let root = build_data_root();
    let service = AuditService::new(EngineSettings::default().with_data_root(root.path())).unwrap();
    let datasets = service.load_all().unwrap();
    let personnel = &datasets.personnel.records;

    let officials = service.officials(personnel);
    let labels: Vec<&str> = officials.iter().map(|o| o.label.as_str()).collect();
    assert_eq!(labels, vec!["HELENA M. PRADO", "CARLOS E. TAVARES"]);

    let helena = officials[0].record;
    let staff = service.staff_links(helena, personnel).unwrap();
    let staff_names: Vec<&str> = staff.matches.iter().map(|l| l.target.name.as_str()).collect();
    assert_eq!(staff_names, vec!["RICARDO PRADO"]);

    let payees = service.payee_links(helena, &datasets.expenditures.records).unwrap();
    let payee_names: Vec<&str> = payees.matches.iter().map(|l| l.target.payee.as_str()).collect();
    assert_eq!(payee_names, vec!["AUTO POSTO PRADO LTDA", "FARMÁCIA MENEZES"]);
    assert_eq!(payees.searched_surnames, vec!["MENEZES", "PRADO"]);

    let carlos = officials[1].record;
    let carlos_payees = service.payee_links(carlos, &datasets.expenditures.records).unwrap();
    assert_eq!(carlos_payees.matches.len(), 1);
    assert_eq!(carlos_payees.matches[0].shared_surname, "TAVARES");
}

#[test]
fn indicators_over_loaded_data() {
    let root = build_data_root();
    let service = AuditService::new(EngineSettings::default().with_data_root(root.path())).unwrap();
    let datasets = service.load_all().unwrap();

    let secretaries = service.secretary_salaries(&datasets.personnel.records).unwrap();
    assert_eq!(secretaries.highest.name, "HELENA MENEZES PRADO");
    assert_eq!(secretaries.lowest.name, "CARLOS EDUARDO TAVARES");

    let professors = service.professor_salaries(&datasets.personnel.records).unwrap();
    assert_eq!(professors.highest.name, "JOANA SILVA");

    // Daily costs: 600 and 250.
    let travel = service.travel_costs(&datasets.travel.records).unwrap();
    assert_eq!(travel.average_daily_cost, 425.0);
    assert_eq!(travel.priciest.traveler, "HELENA MENEZES PRADO");

    let totals = service.category_totals(&datasets.expenditures.records);
    let labels: Vec<&str> = totals.iter().map(|t| t.label.as_str()).collect();
    assert_eq!(labels, vec!["Postos de Combustíveis", "Construção", "Other"]);
    assert_eq!(totals[2].paid, 1150.5);

    let departments: Vec<&str> = datasets.expenditures.records.iter().map(|e| e.department.as_str()).collect();
    assert_eq!(departments, vec!["Other", "Secretaria de Obras", "Other", "Secretaria de Saúde"]);
}

#[test]
fn settings_file_overrides_locations() {
    let root = build_data_root();
    fs::rename(root.path().join("dados_gastos"), root.path().join("folhas")).unwrap();
    let config_path = root.path().join("painel.json");
    fs::write(&config_path, r#"{ "log_level": "debug", "data": { "personnel_folder": "folhas" } }"#).unwrap();

    let settings = EngineSettings::from_json_file(&config_path).unwrap().with_data_root(root.path());
    engine::logging::init_from_settings(&settings).unwrap();
    let service = AuditService::new(settings).unwrap();

    assert_eq!(service.load_personnel().unwrap().len(), 4);
    assert_eq!(service.load_travel().len(), 2);
}
