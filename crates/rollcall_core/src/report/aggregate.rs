//! Grouping and tally computation for roster reports.

use crate::model::duty::Duty;
use crate::model::person::Person;
use crate::model::{normalize_label, DEFAULT_GROUP, DEFAULT_UNIT, UNKNOWN_DUTY};
use crate::order::priority_cmp;
use crate::report::{GROUP_PRIORITY, TOTAL_KEY, UNIT_PRIORITY};

/// Which label partitions the report rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportMode {
    Unit,
    Group,
}

impl ReportMode {
    fn priority(self) -> &'static [&'static str] {
        match self {
            Self::Unit => UNIT_PRIORITY,
            Self::Group => GROUP_PRIORITY,
        }
    }

    fn key_of(self, person: &Person) -> String {
        match self {
            Self::Unit => normalize_label(&person.unit, DEFAULT_UNIT),
            Self::Group => normalize_label(&person.group, DEFAULT_GROUP),
        }
    }
}

/// Per-duty tally within one report row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DutyTally {
    pub duty_name: String,
    pub count: usize,
    /// Names of the tallied people, in roster order.
    pub names: Vec<String>,
}

/// One report row: a unit/group block or the global summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupReport {
    pub key: String,
    /// Head count of the partition (應到).
    pub should_attend: usize,
    /// Members holding any duty for the session (公差).
    pub duty_total: usize,
    /// `should_attend - duty_total` (實到).
    pub actual_attend: usize,
    /// One tally per column of the parent report, aligned with
    /// [`Report::duty_names`]. Zero-count tallies are kept so the tabular
    /// shape stays rectangular.
    pub tallies: Vec<DutyTally>,
}

/// Aggregated report for one `(session, mode)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub mode: ReportMode,
    pub session: String,
    /// Column order: duty collection order, with the unknown-duty label
    /// appended when any dangling assignment was encountered.
    pub duty_names: Vec<String>,
    /// Rows sorted by the mode's priority list.
    pub groups: Vec<GroupReport>,
    /// Global summary over all people, same shape as a group row.
    pub total: GroupReport,
}

impl Report {
    /// Renders the group × duty-count matrix with zeroes as a dash.
    ///
    /// Row layout: `key, should_attend, <one cell per duty>, actual_attend`.
    pub fn matrix(&self) -> Vec<Vec<String>> {
        self.groups
            .iter()
            .chain(std::iter::once(&self.total))
            .map(|group| {
                let mut row = Vec::with_capacity(self.duty_names.len() + 3);
                row.push(group.key.clone());
                row.push(group.should_attend.to_string());
                for tally in &group.tallies {
                    row.push(if tally.count == 0 {
                        "-".to_string()
                    } else {
                        tally.count.to_string()
                    });
                }
                row.push(group.actual_attend.to_string());
                row
            })
            .collect()
    }
}

/// Computes the report for one session and grouping mode.
///
/// Pure function of its inputs; see module docs for the empty-input and
/// dangling-reference guarantees.
pub fn aggregate(people: &[Person], duties: &[Duty], session: &str, mode: ReportMode) -> Report {
    let mut duty_names: Vec<String> = duties.iter().map(|duty| duty.name.clone()).collect();

    let has_dangling = people.iter().any(|person| {
        person
            .assignment(session)
            .is_some_and(|id| !duties.iter().any(|duty| duty.id == id))
    });
    if has_dangling {
        duty_names.push(UNKNOWN_DUTY.to_string());
    }

    let mut keys: Vec<String> = Vec::new();
    for person in people {
        let key = mode.key_of(person);
        if !keys.contains(&key) {
            keys.push(key);
        }
    }
    keys.sort_by(|a, b| priority_cmp(a, b, mode.priority()));

    let groups = keys
        .iter()
        .map(|key| {
            let members: Vec<&Person> = people
                .iter()
                .filter(|person| mode.key_of(person) == *key)
                .collect();
            tally_group(key, &members, duties, session, &duty_names)
        })
        .collect();

    // Global totals are computed over all people independently rather than by
    // summing the per-group rows.
    let everyone: Vec<&Person> = people.iter().collect();
    let total = tally_group(TOTAL_KEY, &everyone, duties, session, &duty_names);

    Report {
        mode,
        session: session.to_string(),
        duty_names,
        groups,
        total,
    }
}

fn tally_group(
    key: &str,
    members: &[&Person],
    duties: &[Duty],
    session: &str,
    duty_names: &[String],
) -> GroupReport {
    let mut tallies: Vec<DutyTally> = duty_names
        .iter()
        .map(|name| DutyTally {
            duty_name: name.clone(),
            count: 0,
            names: Vec::new(),
        })
        .collect();

    let mut duty_total = 0;
    for person in members {
        let Some(assigned) = person.assignment(session) else {
            continue;
        };
        duty_total += 1;
        let label = duties
            .iter()
            .find(|duty| duty.id == assigned)
            .map(|duty| duty.name.as_str())
            .unwrap_or(UNKNOWN_DUTY);
        if let Some(tally) = tallies.iter_mut().find(|tally| tally.duty_name == label) {
            tally.count += 1;
            tally.names.push(person.name.clone());
        }
    }

    GroupReport {
        key: key.to_string(),
        should_attend: members.len(),
        duty_total,
        actual_attend: members.len() - duty_total,
        tallies,
    }
}
