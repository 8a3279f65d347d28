//! Mock data module
//!
//! All numbers and names below are display fixtures standing in for a real
//! CRM backend. They are built once at startup and served unchanged for the
//! lifetime of the process, so every endpoint is idempotent and each body is
//! byte-identical across calls.

use hyper::body::Bytes;
use serde::Serialize;

use crate::logger;

/// The single demo account shown in the dashboard header
#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DemoUser {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub role: String,
    pub team: String,
}

/// Headline numbers for the dashboard cards
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_cases: u32,
    pub open_cases: u32,
    pub pending_cases: u32,
    pub resolved_today: u32,
    pub avg_response_minutes: u32,
    pub sla_compliance: f64,
    pub customer_satisfaction: f64,
}

/// Weekly case volume trend
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendStats {
    pub period: String,
    pub labels: Vec<String>,
    pub opened: Vec<u32>,
    pub resolved: Vec<u32>,
}

/// Per-category share of open cases
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySlice {
    pub category: String,
    pub count: u32,
    pub percent: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownStats {
    pub total: u32,
    pub categories: Vec<CategorySlice>,
}

/// Agent leaderboard row
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentStats {
    pub name: String,
    pub active_cases: u32,
    pub resolved_this_week: u32,
    pub avg_handle_minutes: u32,
    pub satisfaction: f64,
}

/// SLA compliance per priority band
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlaPriority {
    pub priority: String,
    pub target_hours: u32,
    pub compliance: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlaStats {
    pub first_response_target_minutes: u32,
    pub compliance: f64,
    pub breached_this_week: u32,
    pub at_risk: u32,
    pub by_priority: Vec<SlaPriority>,
}

/// Pre-serialized JSON bodies for every mock endpoint
pub struct MockPayloads {
    /// `{"success":true,"user":{...}}` for GET /api/auth/me
    pub me: Bytes,
    pub dashboard: Bytes,
    pub trends: Bytes,
    pub breakdown: Bytes,
    pub agents: Bytes,
    pub sla: Bytes,
}

impl MockPayloads {
    /// Serialize all mock objects once
    pub fn build() -> Self {
        Self {
            me: serialize(
                "me",
                &serde_json::json!({ "success": true, "user": demo_user() }),
            ),
            dashboard: serialize("dashboard", &dashboard_stats()),
            trends: serialize("trends", &trend_stats()),
            breakdown: serialize("breakdown", &breakdown_stats()),
            agents: serialize("agents", &agent_stats()),
            sla: serialize("sla", &sla_stats()),
        }
    }
}

fn serialize<T: Serialize>(name: &str, value: &T) -> Bytes {
    serde_json::to_vec(value).map_or_else(
        |e| {
            logger::log_error(&format!("Failed to serialize mock '{name}': {e}"));
            Bytes::from_static(b"{}")
        },
        Bytes::from,
    )
}

pub fn demo_user() -> DemoUser {
    DemoUser {
        id: 1,
        name: "Alex Morgan".to_string(),
        email: "admin@example.com".to_string(),
        role: "admin".to_string(),
        team: "Support Operations".to_string(),
    }
}

fn dashboard_stats() -> DashboardStats {
    DashboardStats {
        total_cases: 1284,
        open_cases: 187,
        pending_cases: 54,
        resolved_today: 32,
        avg_response_minutes: 42,
        sla_compliance: 94.2,
        customer_satisfaction: 4.6,
    }
}

fn trend_stats() -> TrendStats {
    TrendStats {
        period: "last_7_days".to_string(),
        labels: ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]
            .map(String::from)
            .to_vec(),
        opened: vec![46, 52, 49, 61, 58, 23, 18],
        resolved: vec![41, 48, 55, 57, 62, 28, 20],
    }
}

fn breakdown_stats() -> BreakdownStats {
    BreakdownStats {
        total: 187,
        categories: vec![
            slice("Billing", 58, 31.0),
            slice("Technical", 47, 25.1),
            slice("Account", 34, 18.2),
            slice("Shipping", 29, 15.5),
            slice("Other", 19, 10.2),
        ],
    }
}

fn slice(category: &str, count: u32, percent: f64) -> CategorySlice {
    CategorySlice {
        category: category.to_string(),
        count,
        percent,
    }
}

fn agent_stats() -> Vec<AgentStats> {
    vec![
        agent("Priya Patel", 24, 61, 38, 4.8),
        agent("Marcus Webb", 19, 54, 44, 4.5),
        agent("Sofia Reyes", 22, 49, 41, 4.7),
        agent("Tom Okafor", 17, 45, 52, 4.3),
        agent("Lena Fischer", 21, 42, 47, 4.4),
    ]
}

fn agent(
    name: &str,
    active_cases: u32,
    resolved_this_week: u32,
    avg_handle_minutes: u32,
    satisfaction: f64,
) -> AgentStats {
    AgentStats {
        name: name.to_string(),
        active_cases,
        resolved_this_week,
        avg_handle_minutes,
        satisfaction,
    }
}

fn sla_stats() -> SlaStats {
    SlaStats {
        first_response_target_minutes: 60,
        compliance: 94.2,
        breached_this_week: 11,
        at_risk: 7,
        by_priority: vec![
            SlaPriority {
                priority: "urgent".to_string(),
                target_hours: 4,
                compliance: 91.4,
            },
            SlaPriority {
                priority: "high".to_string(),
                target_hours: 8,
                compliance: 93.8,
            },
            SlaPriority {
                priority: "normal".to_string(),
                target_hours: 24,
                compliance: 95.6,
            },
            SlaPriority {
                priority: "low".to_string(),
                target_hours: 72,
                compliance: 98.1,
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payloads_are_stable() {
        let a = MockPayloads::build();
        let b = MockPayloads::build();
        assert_eq!(a.dashboard, b.dashboard);
        assert_eq!(a.trends, b.trends);
        assert_eq!(a.breakdown, b.breakdown);
        assert_eq!(a.agents, b.agents);
        assert_eq!(a.sla, b.sla);
        assert_eq!(a.me, b.me);
    }

    #[test]
    fn test_payloads_match_source_structs() {
        let payloads = MockPayloads::build();
        assert_eq!(
            payloads.dashboard,
            serde_json::to_vec(&dashboard_stats()).unwrap()
        );
        assert_eq!(payloads.agents, serde_json::to_vec(&agent_stats()).unwrap());
    }

    #[test]
    fn test_wire_names_are_camel_case() {
        let json: serde_json::Value =
            serde_json::from_slice(&MockPayloads::build().dashboard).unwrap();
        assert!(json.get("totalCases").is_some());
        assert!(json.get("slaCompliance").is_some());
        assert!(json.get("total_cases").is_none());
    }

    #[test]
    fn test_me_payload_shape() {
        let json: serde_json::Value = serde_json::from_slice(&MockPayloads::build().me).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["user"]["email"], "admin@example.com");
        assert_eq!(json["user"]["role"], "admin");
    }

    #[test]
    fn test_breakdown_counts_sum_to_total() {
        let stats = breakdown_stats();
        let sum: u32 = stats.categories.iter().map(|c| c.count).sum();
        assert_eq!(sum, stats.total);
    }
}
