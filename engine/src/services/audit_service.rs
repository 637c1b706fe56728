// Facade over loaders, analysis and indicators, configured once from EngineSettings.
use shared::models::{ExpenditureRecord, NamedRecord, PersonnelRecord, TravelRecord};

use crate::analysis::categories::CategoryClassifier;
use crate::analysis::links::{LinkFinder, LinkSearch};
use crate::analysis::roles::{self, Official};
use crate::analysis::search::search_by_name;
use crate::config::settings::EngineSettings;
use crate::data::expenditure::{self, PayeeClassifiers};
use crate::data::personnel::{self, MonthFilePattern};
use crate::data::{travel, Dataset};
use crate::error::EngineError;
use crate::indicators::{
    CategoryTotal, CategoryTotals, Indicator, SalaryExtremes, SalaryRange, TravelCost,
    TravelCostSummary,
};

/// The three cleaned tables the dashboard works from.
#[derive(Debug, Default)]
pub struct Datasets {
    pub personnel: Dataset<PersonnelRecord>,
    pub travel: Dataset<TravelRecord>,
    pub expenditures: Dataset<ExpenditureRecord>,
}

impl Datasets {
    pub fn skipped_count(&self) -> usize {
        self.personnel.skipped_count()
            + self.travel.skipped_count()
            + self.expenditures.skipped_count()
    }
}

pub struct AuditService {
    settings: EngineSettings,
    month_pattern: MonthFilePattern,
    link_finder: LinkFinder,
    categories: CategoryClassifier,
    departments: CategoryClassifier,
    secretary_pay: SalaryRange,
    professor_pay: SalaryRange,
}

impl AuditService {
    /// Fails only when a configured role pattern is not a valid regex.
    pub fn new(settings: EngineSettings) -> Result<Self, EngineError> {
        let secretary_pay = SalaryRange::new("secretary", &settings.roles.secretary)?;
        let professor_pay = SalaryRange::new("professor", &settings.roles.professor)?;

        Ok(AuditService {
            month_pattern: MonthFilePattern::from_settings(&settings.data),
            link_finder: LinkFinder::from_settings(&settings.surnames),
            categories: CategoryClassifier::new(&settings.categories),
            departments: CategoryClassifier::new(&settings.departments),
            secretary_pay,
            professor_pay,
            settings,
        })
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn link_finder(&self) -> &LinkFinder {
        &self.link_finder
    }

    pub fn categories(&self) -> &CategoryClassifier {
        &self.categories
    }

    pub fn departments(&self) -> &CategoryClassifier {
        &self.departments
    }

    pub fn load_personnel(&self) -> Result<Dataset<PersonnelRecord>, EngineError> {
        personnel::aggregate(&self.settings.data.personnel_folder, &self.month_pattern)
    }

    pub fn load_travel(&self) -> Dataset<TravelRecord> {
        travel::load_travel(&self.settings.data.travel_file, &self.settings.data)
    }

    pub fn load_expenditures(&self) -> Dataset<ExpenditureRecord> {
        let classifiers = PayeeClassifiers {
            categories: &self.categories,
            departments: &self.departments,
        };
        let data = &self.settings.data;
        expenditure::load_expenditures(&data.expenditure_file, data, &classifiers)
    }

    pub fn load_all(&self) -> Result<Datasets, EngineError> {
        let datasets = Datasets {
            personnel: self.load_personnel()?,
            travel: self.load_travel(),
            expenditures: self.load_expenditures(),
        };
        tracing::info!(
            personnel = datasets.personnel.len(),
            trips = datasets.travel.len(),
            expenditures = datasets.expenditures.len(),
            skipped_files = datasets.skipped_count(),
            "All datasets loaded"
        );
        Ok(datasets)
    }

    /// Distinct secretaries, labelled for selection.
    pub fn officials<'a>(&self, personnel: &'a [PersonnelRecord]) -> Vec<Official<'a>> {
        roles::officials(personnel, self.secretary_pay.matcher(), self.link_finder.extractor())
    }

    /// Non-secretary staff sharing an uncommon surname with `target`, one
    /// match per distinct (name, role) however many months they appear in.
    pub fn staff_links<'a>(
        &self,
        target: &'a PersonnelRecord,
        personnel: &'a [PersonnelRecord],
    ) -> Result<LinkSearch<'a, PersonnelRecord>, EngineError> {
        let staff = roles::staff_pool(personnel, self.secretary_pay.matcher());
        self.link_finder.find_links_within(target, staff)
    }

    /// Payees sharing an uncommon surname with `target`, including payees
    /// carrying the target's own name.
    pub fn payee_links<'a>(
        &self,
        target: &'a PersonnelRecord,
        expenditures: &'a [ExpenditureRecord],
    ) -> Result<LinkSearch<'a, ExpenditureRecord>, EngineError> {
        self.link_finder.find_links(target, expenditures)
    }

    pub fn secretary_salaries(&self, personnel: &[PersonnelRecord]) -> Option<SalaryExtremes> {
        run_indicator(&self.secretary_pay, personnel)
    }

    pub fn professor_salaries(&self, personnel: &[PersonnelRecord]) -> Option<SalaryExtremes> {
        run_indicator(&self.professor_pay, personnel)
    }

    pub fn travel_costs(&self, travel: &[TravelRecord]) -> Option<TravelCostSummary> {
        run_indicator(&TravelCost, travel)
    }

    pub fn category_totals(&self, expenditures: &[ExpenditureRecord]) -> Vec<CategoryTotal> {
        run_indicator(&CategoryTotals::new(&self.categories), expenditures)
    }

    pub fn search<'a, T: NamedRecord>(&self, records: &'a [T], query: &str) -> Vec<&'a T> {
        search_by_name(records, query)
    }
}

fn run_indicator<T, I: Indicator<T>>(indicator: &I, records: &[T]) -> I::Output {
    tracing::debug!(
        indicator = indicator.name(),
        parameters = %indicator.parameters(),
        records = records.len(),
        "Calculating indicator"
    );
    indicator.calculate(records)
}
