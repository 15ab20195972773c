//! Contribution lifecycle: submission, aggregates and report export.
use chrono::Local;
use shared::{ContributionStatus, ContributionValidationError, Notification, PaymentMethodTotal, RecentContributionPoint};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

use super::commands::{
    ContributionReport, ExportReportResult, SubmissionResult, SubmissionState, SubmitContributionCommand,
};
use super::contribution_form::ContributionFormService;
use super::export_service::{format_currency, ExportService};
use super::models::contribution::Contribution;
use super::notifier::{
    Notifier, REPORT_DOWNLOADED_MESSAGE, REPORT_FAILED_MESSAGE, SUBMISSION_IN_PROGRESS_MESSAGE,
    TRANSACTION_ERROR_MESSAGE, TRANSACTION_FAILED_MESSAGE, TRANSACTION_SUCCESS_MESSAGE,
};
use super::statistics::{self, RECENT_CONTRIBUTIONS_LIMIT};
use super::transaction_simulator::TransactionSimulator;
use crate::storage::{Connection, ContributionStore, ReportSink};

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("A transaction is already in progress")]
    SubmissionInProgress,
    #[error("Invalid contribution: {0:?}")]
    InvalidInput(Vec<ContributionValidationError>),
    #[error("Failed to save contribution: {0:#}")]
    Storage(#[source] anyhow::Error),
}

impl SubmissionError {
    /// The user-visible notification raised for this error
    pub fn notification(&self) -> Notification {
        match self {
            SubmissionError::SubmissionInProgress => Notification::error(SUBMISSION_IN_PROGRESS_MESSAGE),
            SubmissionError::InvalidInput(_) | SubmissionError::Storage(_) => {
                Notification::error(TRANSACTION_ERROR_MESSAGE)
            }
        }
    }
}

impl SubmissionResult {
    /// The user-visible notification raised for this outcome
    pub fn notification(&self) -> Notification {
        if self.success {
            Notification::success(TRANSACTION_SUCCESS_MESSAGE)
        } else {
            Notification::error(TRANSACTION_FAILED_MESSAGE)
        }
    }
}

/// Clears the in-flight flag when the submission ends, however it ends
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

pub struct ContributionService<C: Connection> {
    store: Arc<ContributionStore<C::ContributionRepository>>,
    simulator: TransactionSimulator,
    notifier: Arc<dyn Notifier>,
    report_sink: Arc<dyn ReportSink>,
    form_service: ContributionFormService,
    export_service: ExportService,
    submitting: Arc<AtomicBool>,
}

impl<C: Connection> Clone for ContributionService<C> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            simulator: self.simulator.clone(),
            notifier: Arc::clone(&self.notifier),
            report_sink: Arc::clone(&self.report_sink),
            form_service: self.form_service.clone(),
            export_service: self.export_service.clone(),
            submitting: Arc::clone(&self.submitting),
        }
    }
}

impl<C: Connection> ContributionService<C> {
    /// Load the saved contributions from `connection` and wire the service
    pub fn new(
        connection: Arc<C>,
        simulator: TransactionSimulator,
        notifier: Arc<dyn Notifier>,
        report_sink: Arc<dyn ReportSink>,
    ) -> Self {
        let store = ContributionStore::load(connection.create_contribution_repository());
        Self {
            store: Arc::new(store),
            simulator,
            notifier,
            report_sink,
            form_service: ContributionFormService::new(),
            export_service: ExportService::new(),
            submitting: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn state(&self) -> SubmissionState {
        if self.submitting.load(Ordering::Acquire) {
            SubmissionState::Submitting
        } else {
            SubmissionState::Idle
        }
    }

    /// Run one contribution through the simulated payment and record it.
    ///
    /// Whatever the simulated outcome, exactly one record is stored and
    /// exactly one notification is raised. `success` on the result is false
    /// when the simulated payment failed. Only one submission may run at a
    /// time; overlapping calls are rejected without creating a record.
    pub async fn submit(&self, command: SubmitContributionCommand) -> Result<SubmissionResult, SubmissionError> {
        let result = self.run_submission(command).await;
        let notification = match &result {
            Ok(submission) => submission.notification(),
            Err(e) => e.notification(),
        };
        self.notifier.notify(notification);
        result
    }

    async fn run_submission(&self, command: SubmitContributionCommand) -> Result<SubmissionResult, SubmissionError> {
        let Some(_in_flight) = InFlightGuard::acquire(&self.submitting) else {
            warn!("Rejected contribution from {}: another submission is in flight", command.name);
            return Err(SubmissionError::SubmissionInProgress);
        };

        let errors = self.form_service.validate_command(&command);
        if !errors.is_empty() {
            warn!("Rejected invalid contribution: {:?}", errors);
            return Err(SubmissionError::InvalidInput(errors));
        }

        info!(
            "Submitting contribution: {} via {} ({})",
            command.name,
            command.payment_method,
            format_currency(command.amount)
        );

        let success = self.simulator.attempt().await;

        let now = Local::now();
        let contribution = Contribution {
            id: Contribution::generate_id(now.timestamp_millis()),
            name: command.name,
            amount: command.amount,
            payment_method: command.payment_method,
            phone_number: command.phone_number,
            date: Contribution::format_date(&now),
            status: if success {
                ContributionStatus::Success
            } else {
                ContributionStatus::Failed
            },
        };

        if let Err(e) = self.store.append(contribution.clone()) {
            error!("Failed to save contribution {}: {:#}", contribution.id, e);
            return Err(SubmissionError::Storage(e));
        }

        info!("Recorded contribution {} with status {}", contribution.id, contribution.status);
        Ok(SubmissionResult { success, contribution })
    }

    /// All contributions, newest first
    pub fn contributions(&self) -> Vec<Contribution> {
        self.store.all()
    }

    /// Successful contributions, newest first
    pub fn successful_contributions(&self) -> Vec<Contribution> {
        self.store
            .with_contributions(|contributions| statistics::successful(contributions).cloned().collect())
    }

    pub fn has_contributions(&self) -> bool {
        !self.store.is_empty()
    }

    /// Sum of successful contribution amounts
    pub fn total_amount(&self) -> f64 {
        self.store.with_contributions(statistics::total_amount)
    }

    /// Number of distinct names among successful contributions
    pub fn total_contributors(&self) -> usize {
        self.store.with_contributions(statistics::total_contributors)
    }

    pub fn payment_method_breakdown(&self) -> Vec<PaymentMethodTotal> {
        self.store.with_contributions(statistics::payment_method_breakdown)
    }

    pub fn recent_contributions(&self) -> Vec<RecentContributionPoint> {
        self.store.with_contributions(|contributions| {
            statistics::recent_contributions(contributions, RECENT_CONTRIBUTIONS_LIMIT)
        })
    }

    /// Render the report without delivering it
    pub fn build_report(&self) -> ContributionReport {
        self.store
            .with_contributions(|contributions| self.export_service.build_report(contributions))
    }

    /// Render the report, hand it to the report sink and notify the user
    pub fn export_report(&self) -> anyhow::Result<ExportReportResult> {
        let report = self.build_report();
        match self.report_sink.deliver(&report.filename, &report.content) {
            Ok(location) => {
                info!(
                    "Exported report with {} contributions to {}",
                    report.contribution_count, location
                );
                self.notifier.notify(Notification::success(REPORT_DOWNLOADED_MESSAGE));
                Ok(ExportReportResult { report, location })
            }
            Err(e) => {
                error!("Failed to export report: {:#}", e);
                self.notifier.notify(Notification::error(REPORT_FAILED_MESSAGE));
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::notifier::RecordingNotifier;
    use crate::domain::transaction_simulator::ScriptedRandomSource;
    use crate::storage::file::test_utils::TestEnvironment;
    use crate::storage::{FileConnection, MemoryConnection, MemoryReportSink};
    use shared::{NotificationKind, PaymentMethod};
    use std::collections::HashSet;

    struct Harness {
        service: ContributionService<MemoryConnection>,
        connection: Arc<MemoryConnection>,
        notifier: RecordingNotifier,
        sink: MemoryReportSink,
    }

    fn harness(simulator: TransactionSimulator) -> Harness {
        harness_with(MemoryConnection::new(), simulator)
    }

    fn harness_with(connection: MemoryConnection, simulator: TransactionSimulator) -> Harness {
        let connection = Arc::new(connection);
        let notifier = RecordingNotifier::new();
        let sink = MemoryReportSink::new();
        let service = ContributionService::new(
            connection.clone(),
            simulator,
            Arc::new(notifier.clone()),
            Arc::new(sink.clone()),
        );
        Harness {
            service,
            connection,
            notifier,
            sink,
        }
    }

    fn command(name: &str, amount: f64) -> SubmitContributionCommand {
        SubmitContributionCommand {
            name: name.to_string(),
            amount,
            payment_method: PaymentMethod::MPesa,
            phone_number: "0712345678".to_string(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_successful_submission() {
        let h = harness(TransactionSimulator::always_succeeding());

        let result = h.service.submit(command("Asha Juma", 5000.0)).await.unwrap();
        assert!(result.success);
        assert_eq!(result.contribution.status, ContributionStatus::Success);

        let contributions = h.service.contributions();
        assert_eq!(contributions.len(), 1);
        assert_eq!(contributions[0], result.contribution);
        assert_eq!(h.service.total_amount(), 5000.0);
        assert_eq!(h.service.total_contributors(), 1);

        let notifications = h.notifier.notifications();
        assert_eq!(notifications, vec![Notification::success("Transaction successful!")]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_submission_is_still_recorded() {
        let h = harness(TransactionSimulator::always_failing());

        let result = h.service.submit(command("Juma Ali", 700.0)).await.unwrap();
        assert!(!result.success);
        assert_eq!(result.contribution.status, ContributionStatus::Failed);
        assert_eq!(h.service.contributions().len(), 1);
        assert_eq!(h.service.total_amount(), 0.0);
        assert_eq!(h.service.total_contributors(), 0);

        let notifications = h.notifier.notifications();
        assert_eq!(
            notifications,
            vec![Notification::error("Transaction failed. Please try again.")]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_unseeded_submission_is_never_pending() {
        let h = harness(TransactionSimulator::unseeded());

        let result = h.service.submit(command("Asha Juma", 5000.0)).await.unwrap();
        assert_ne!(result.contribution.status, ContributionStatus::Pending);
        assert_eq!(result.success, result.contribution.status == ContributionStatus::Success);
        assert_eq!(h.service.contributions()[0].id, result.contribution.id);
        assert_eq!(h.service.contributions()[0].name, "Asha Juma");
        assert_eq!(h.notifier.notifications().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_each_submission_appends_one_unique_record() {
        let h = harness(TransactionSimulator::unseeded());

        for i in 0..10 {
            h.service.submit(command("Asha Juma", 100.0 + i as f64)).await.unwrap();
            assert_eq!(h.service.contributions().len(), i + 1);
        }

        let ids: HashSet<String> = h.service.contributions().into_iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), 10);
        assert_eq!(h.notifier.notifications().len(), 10);
    }

    #[tokio::test(start_paused = true)]
    async fn test_mixed_outcomes_aggregate_only_successes() {
        let random = ScriptedRandomSource::new([0.1, 0.2, 0.95]);
        let h = harness(TransactionSimulator::new(Arc::new(random)));

        h.service.submit(command("Asha Juma", 5000.0)).await.unwrap();
        h.service.submit(command("Asha Juma", 3000.0)).await.unwrap();
        let failed = h.service.submit(command("Juma Ali", 700.0)).await.unwrap();
        assert!(!failed.success);

        assert_eq!(h.service.total_contributors(), 1);
        assert_eq!(h.service.total_amount(), 8000.0);
        assert_eq!(h.service.successful_contributions().len(), 2);

        // Newest first
        let names: Vec<String> = h.service.contributions().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Juma Ali", "Asha Juma", "Asha Juma"]);

        // Queries are repeatable
        assert_eq!(h.service.total_amount(), h.service.total_amount());
        assert_eq!(h.service.contributions(), h.service.contributions());
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_submission_is_rejected() {
        let h = harness(TransactionSimulator::always_succeeding());
        assert_eq!(h.service.state(), SubmissionState::Idle);

        let first = {
            let service = h.service.clone();
            tokio::spawn(async move { service.submit(command("Asha Juma", 100.0)).await })
        };
        // Let the first submission reach the simulated latency
        for _ in 0..100 {
            if h.service.state() == SubmissionState::Submitting {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert_eq!(h.service.state(), SubmissionState::Submitting);

        let second = h.service.submit(command("Juma Ali", 200.0)).await;
        assert!(matches!(second, Err(SubmissionError::SubmissionInProgress)));

        let first = first.await.unwrap().unwrap();
        assert!(first.success);
        assert_eq!(h.service.state(), SubmissionState::Idle);
        assert_eq!(h.service.contributions().len(), 1);

        let kinds: Vec<NotificationKind> = h.notifier.notifications().into_iter().map(|n| n.kind).collect();
        assert_eq!(kinds, vec![NotificationKind::Error, NotificationKind::Success]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_storage_failure_is_reported() {
        let h = harness(TransactionSimulator::always_succeeding());
        h.connection.set_fail_writes(true);

        let result = h.service.submit(command("Asha Juma", 100.0)).await;
        assert!(matches!(result, Err(SubmissionError::Storage(_))));
        assert!(!h.service.has_contributions());
        assert_eq!(h.service.state(), SubmissionState::Idle);
        assert_eq!(
            h.notifier.notifications(),
            vec![Notification::error("An error occurred during the transaction.")]
        );

        // Storage recovers, submissions work again
        h.connection.set_fail_writes(false);
        assert!(h.service.submit(command("Asha Juma", 100.0)).await.is_ok());
        assert_eq!(h.service.contributions().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_command_is_rejected() {
        let h = harness(TransactionSimulator::always_succeeding());
        let mut bad = command("Asha", 0.0);
        bad.phone_number = "12345".to_string();

        let result = h.service.submit(bad).await;
        match result {
            Err(SubmissionError::InvalidInput(errors)) => assert_eq!(errors.len(), 2),
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(!h.service.has_contributions());
        assert_eq!(h.notifier.notifications().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_contributions_survive_reload() {
        let env = TestEnvironment::new().unwrap();
        let connection = Arc::new(env.connection.clone());
        let service: ContributionService<FileConnection> = ContributionService::new(
            connection.clone(),
            TransactionSimulator::always_succeeding(),
            Arc::new(RecordingNotifier::new()),
            Arc::new(MemoryReportSink::new()),
        );
        service.submit(command("Asha Juma", 5000.0)).await.unwrap();
        service.submit(command("Neema Said", 1500.0)).await.unwrap();

        let reloaded: ContributionService<FileConnection> = ContributionService::new(
            connection,
            TransactionSimulator::always_succeeding(),
            Arc::new(RecordingNotifier::new()),
            Arc::new(MemoryReportSink::new()),
        );
        assert_eq!(reloaded.contributions(), service.contributions());
        assert_eq!(reloaded.total_amount(), 6500.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_corrupt_saved_data_starts_empty() {
        let h = harness_with(MemoryConnection::with_blob("[{\"id\": 42}"), TransactionSimulator::always_succeeding());
        assert!(!h.service.has_contributions());
        assert_eq!(h.service.total_amount(), 0.0);
        assert!(h.notifier.notifications().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_export_report() {
        let random = ScriptedRandomSource::new([0.1, 0.95, 0.1]);
        let h = harness(TransactionSimulator::new(Arc::new(random)));
        h.service.submit(command("Asha Juma", 5000.0)).await.unwrap();
        h.service.submit(command("Juma Ali", 700.0)).await.unwrap();
        h.service.submit(command("Neema Said", 1500.0)).await.unwrap();

        let result = h.service.export_report().unwrap();
        assert_eq!(result.location, "memory://faraja-contributions.txt");
        assert_eq!(result.report.contribution_count, 3);

        let content = &result.report.content;
        assert!(content.contains("Total Contributors: 2\n"));
        assert!(content.contains("Total Amount: TZS 6,500\n"));
        let first = content.find("Contribution #1\n").unwrap();
        let second = content.find("Contribution #2\n").unwrap();
        let third = content.find("Contribution #3\n").unwrap();
        assert!(first < second && second < third);
        assert!(!content.contains("Contribution #4"));
        assert!(content[first..second].contains("Name: Neema Said"));
        assert!(content[second..third].contains("Status: failed"));

        let delivered = h.sink.delivered();
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].0, "faraja-contributions.txt");
        assert_eq!(&delivered[0].1, content);

        let last = h.notifier.notifications().pop().unwrap();
        assert_eq!(last, Notification::success("Report downloaded successfully!"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_breakdown_and_recent() {
        let h = harness(TransactionSimulator::always_succeeding());
        h.service.submit(command("Asha Juma", 5000.0)).await.unwrap();
        let mut tigo = command("Juma Ali", 700.0);
        tigo.payment_method = PaymentMethod::TigoPesa;
        h.service.submit(tigo).await.unwrap();

        let breakdown = h.service.payment_method_breakdown();
        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[0].payment_method, PaymentMethod::MPesa);
        assert_eq!(breakdown[1].amount, 700.0);

        let recent = h.service.recent_contributions();
        let names: Vec<&str> = recent.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Asha", "Juma"]);
    }
}
