//! Exhaustive audits over many fallback orders.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use unbeatable_core::{audit, AuditReport, FallbackOrder, Player, Side};

/// Audit of one fallback order for both sides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderAudit {
    /// The audited order.
    pub order: FallbackOrder,
    /// Engine playing X.
    pub as_x: AuditReport,
    /// Engine playing O.
    pub as_o: AuditReport,
}

impl OrderAudit {
    /// Whether neither side loses any line.
    pub fn is_unbeaten(&self) -> bool {
        self.as_x.is_unbeaten() && self.as_o.is_unbeaten()
    }

    /// Report for `side`.
    pub fn report(&self, side: Side) -> &AuditReport {
        match side {
            Side::X => &self.as_x,
            Side::O => &self.as_o,
        }
    }
}

/// Audits across a set of orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    /// One entry per order, the unshuffled order first.
    pub audits: Vec<OrderAudit>,
}

impl AnalysisSummary {
    /// Orders audited.
    pub fn orders(&self) -> usize {
        self.audits.len()
    }

    /// Orders under which `side` never loses.
    pub fn unbeaten(&self, side: Side) -> usize {
        self.audits
            .iter()
            .filter(|a| a.report(side).is_unbeaten())
            .count()
    }

    /// Losses summed over every order and side.
    pub fn total_losses(&self) -> usize {
        self.audits
            .iter()
            .map(|a| a.as_x.losses + a.as_o.losses)
            .sum()
    }

    /// Losses where the engine faced at most one threat.
    pub fn single_threat_losses(&self) -> usize {
        self.audits
            .iter()
            .map(|a| a.as_x.single_threat_losses + a.as_o.single_threat_losses)
            .sum()
    }

    /// First report with a losing line, with its order.
    pub fn sample_loss(&self) -> Option<(&FallbackOrder, &AuditReport)> {
        self.audits.iter().find_map(|a| {
            [&a.as_x, &a.as_o]
                .into_iter()
                .find(|r| r.first_loss.is_some())
                .map(|r| (&a.order, r))
        })
    }
}

impl std::fmt::Display for AnalysisSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Audited {} fallback orders", self.orders())?;
        writeln!(f, "  Unbeaten as X: {}/{}", self.unbeaten(Side::X), self.orders())?;
        writeln!(f, "  Unbeaten as O: {}/{}", self.unbeaten(Side::O), self.orders())?;
        writeln!(f, "  Losing lines:  {}", self.total_losses())?;
        write!(f, "  Losses facing a single threat: {}", self.single_threat_losses())?;

        let Some((order, report)) = self.sample_loss() else {
            return Ok(());
        };
        let moves: Vec<String> = report
            .first_loss
            .iter()
            .flatten()
            .map(ToString::to_string)
            .collect();
        write!(
            f,
            "\nSample loss ({} with order {}):\n  {}",
            report.side,
            order,
            moves.join(", ")
        )
    }
}

/// Audits `orders` fallback orders for both sides.
///
/// The first order is always the unshuffled base order; the rest are
/// shuffled from `seed`, or from thread randomness when it is absent.
#[instrument]
pub fn analyze(orders: usize, seed: Option<u64>) -> AnalysisSummary {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    let audits: Vec<OrderAudit> = (0..orders)
        .map(|i| {
            let order = if i == 0 {
                FallbackOrder::default()
            } else {
                FallbackOrder::shuffled(&mut rng)
            };
            OrderAudit {
                order,
                as_x: audit(&Player::with_order(Side::X, order)),
                as_o: audit(&Player::with_order(Side::O, order)),
            }
        })
        .collect();

    let summary = AnalysisSummary { audits };
    if summary.single_threat_losses() > 0 {
        warn!(
            count = summary.single_threat_losses(),
            "Engine lost a line it could have blocked"
        );
    }
    info!(
        orders = summary.orders(),
        losses = summary.total_losses(),
        "Analysis complete"
    );
    summary
}
