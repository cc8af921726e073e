use crate::models::{Issue, IssueStatus};

/// Contadores del dashboard, calculados sobre un lote acotado de issues.
/// Con más issues que el límite del lote los números quedan cortos.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct DashboardStats {
    pub total: usize,
    pub pending: usize,
    pub resolved: usize,
}

impl DashboardStats {
    pub fn from_issues(issues: &[Issue]) -> Self {
        Self {
            total: issues.len(),
            pending: issues.iter().filter(|i| i.status == IssueStatus::Pending).count(),
            resolved: issues.iter().filter(|i| i.status.is_settled()).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::issue_with_status;

    #[test]
    fn counts_resolved_and_closed_together() {
        let statuses = [
            IssueStatus::Pending,
            IssueStatus::Resolved,
            IssueStatus::Closed,
            IssueStatus::Pending,
            IssueStatus::InProgress,
        ];
        let issues: Vec<Issue> = statuses
            .iter()
            .enumerate()
            .map(|(i, s)| issue_with_status(i as i64 + 1, *s))
            .collect();

        let stats = DashboardStats::from_issues(&issues);
        assert_eq!(stats, DashboardStats { total: 5, pending: 2, resolved: 2 });
    }

    #[test]
    fn empty_batch_is_all_zero() {
        assert_eq!(DashboardStats::from_issues(&[]), DashboardStats::default());
    }
}
