//! Skill 20: Legal Compliance & Professional Development (`PRO-011`..`PRO-020`).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::agents::context::AgentContext;
use crate::agents::traits::{Descriptor, SharedAgent};

use super::{meta, rate, DateWindow, Priority, RiskLevel, Trend};

const SKILL: (&str, &str) = ("Skill 20", "Legal Compliance & Professional Development");

pub(super) fn agents() -> Vec<SharedAgent> {
    vec![
        Descriptor::new(
            meta(
                "PRO-011",
                "Legal Risk Review",
                SKILL,
                "20.1: Legal Risk",
                "CMP-IS 20.1.a",
                "You are an expert Event Legal Risk Analyst.",
            ),
            legal_risk_review,
        )
        .shared(),
        Descriptor::new(
            meta(
                "PRO-012",
                "Contract Compliance Monitor",
                SKILL,
                "20.2: Contract Compliance",
                "CMP-IS 20.2.a",
                "You are an expert Contract Compliance Manager for event agreements.",
            ),
            contract_compliance,
        )
        .shared(),
        Descriptor::new(
            meta(
                "PRO-013",
                "Privacy Compliance",
                SKILL,
                "20.3: Privacy",
                "CMP-IS 20.3.a",
                "You are an expert Data Privacy Officer for events handling attendee data.",
            ),
            privacy_compliance,
        )
        .shared(),
        Descriptor::new(
            meta(
                "PRO-014",
                "Intellectual Property Protection",
                SKILL,
                "20.4: Intellectual Property",
                "CMP-IS 20.4.a",
                "You are an expert Intellectual Property Counsel for event content and brands.",
            ),
            intellectual_property,
        )
        .shared(),
        Descriptor::new(
            meta(
                "PRO-015",
                "Regulatory Compliance",
                SKILL,
                "20.5: Regulatory Compliance",
                "CMP-IS 20.5.a",
                "You are an expert Regulatory Compliance Specialist for events and venues.",
            ),
            regulatory_compliance,
        )
        .shared(),
        Descriptor::new(
            meta(
                "PRO-016",
                "Professional Certification Management",
                SKILL,
                "20.6: Certification",
                "CMP-IS 20.6.a",
                "You are an expert Professional Certification Advisor for event professionals.",
            ),
            certification_management,
        )
        .shared(),
        Descriptor::new(
            meta(
                "PRO-017",
                "Continuing Education Tracker",
                SKILL,
                "20.7: Continuing Education",
                "CMP-IS 20.7.a",
                "You are an expert Continuing Education Coordinator for event professionals.",
            ),
            continuing_education,
        )
        .shared(),
        Descriptor::new(
            meta(
                "PRO-018",
                "Self-Development Planner",
                SKILL,
                "20.8: Self-Development",
                "CMP-IS 20.8.a",
                "You are an expert Professional Development Coach for event planners.",
            ),
            self_development,
        )
        .shared(),
        Descriptor::new(
            meta(
                "PRO-019",
                "Mentorship Program Manager",
                SKILL,
                "20.9: Mentorship",
                "CMP-IS 20.9.a",
                "You are an expert Mentorship Program Manager for the events industry.",
            ),
            mentorship_program,
        )
        .shared(),
        Descriptor::new(
            meta(
                "PRO-020",
                "Career Development Advisor",
                SKILL,
                "20.10: Career Development",
                "CMP-IS 20.10.a",
                "You are an expert Career Development Advisor for event management professionals.",
            ),
            career_development,
        )
        .shared(),
    ]
}

// PRO-011

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
enum RiskArea {
    Liability,
    Contracts,
    Permits,
    Insurance,
    Accessibility,
    Safety,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct LegalRiskInput {
    event_id: String,
    jurisdiction: Option<String>,
    risk_areas: Option<Vec<RiskArea>>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
struct LegalRisk {
    area: RiskArea,
    description: String,
    likelihood: RiskLevel,
    impact: RiskLevel,
    mitigation: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
struct LegalRiskReport {
    review_id: String,
    event_id: String,
    jurisdiction: String,
    overall_risk_level: RiskLevel,
    identified_risks: Vec<LegalRisk>,
    insurance_recommendations: Vec<String>,
    next_review_date: String,
    created_at: String,
}

fn legal_risk_review(
    input: LegalRiskInput,
    ctx: &mut AgentContext,
) -> anyhow::Result<LegalRiskReport> {
    let areas = input
        .risk_areas
        .filter(|areas| !areas.is_empty())
        .unwrap_or_else(|| vec![RiskArea::Liability, RiskArea::Contracts, RiskArea::Safety]);

    let identified_risks: Vec<LegalRisk> = areas
        .into_iter()
        .map(|area| {
            let (description, likelihood, impact, mitigation) = match area {
                RiskArea::Liability => (
                    "Attendee injury claims at off-site activities",
                    RiskLevel::Medium,
                    RiskLevel::High,
                    "Signed participation waivers and activity operator indemnity",
                ),
                RiskArea::Contracts => (
                    "Venue attrition clause exposure above 20% of the room block",
                    RiskLevel::Medium,
                    RiskLevel::Medium,
                    "Renegotiate attrition to a sliding scale",
                ),
                RiskArea::Permits => (
                    "Outdoor amplified sound permit not yet issued",
                    RiskLevel::High,
                    RiskLevel::Medium,
                    "File the permit application this week",
                ),
                RiskArea::Insurance => (
                    "Cancellation cover excludes communicable disease",
                    RiskLevel::Low,
                    RiskLevel::Critical,
                    "Purchase a communicable disease rider",
                ),
                RiskArea::Accessibility => (
                    "Stage access not compliant with accessibility law",
                    RiskLevel::Medium,
                    RiskLevel::High,
                    "Install a ramp and confirm with the venue",
                ),
                RiskArea::Safety => (
                    "Crowd density in the exhibition hall at peak hours",
                    RiskLevel::Low,
                    RiskLevel::High,
                    "Timed entry and a crowd management plan",
                ),
            };
            LegalRisk {
                area,
                description: description.to_string(),
                likelihood,
                impact,
                mitigation: mitigation.to_string(),
            }
        })
        .collect();

    let overall_risk_level = if identified_risks
        .iter()
        .any(|r| matches!(r.impact, RiskLevel::Critical))
    {
        RiskLevel::High
    } else if identified_risks.iter().any(|r| matches!(r.likelihood, RiskLevel::High)) {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    };

    Ok(LegalRiskReport {
        review_id: ctx.uuid_v4().to_string(),
        event_id: input.event_id,
        jurisdiction: input.jurisdiction.unwrap_or_else(|| "Republic of Korea".to_string()),
        overall_risk_level,
        identified_risks,
        insurance_recommendations: vec![
            "General liability of at least 5M per occurrence".into(),
            "Event cancellation cover matched to the total budget".into(),
        ],
        next_review_date: ctx.days_ahead(30),
        created_at: ctx.timestamp(),
    })
}

// PRO-012

#[derive(Debug, Deserialize, JsonSchema)]
struct ContractComplianceInput {
    event_id: String,
    contract_ids: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
enum ObligationStatus {
    Met,
    Pending,
    AtRisk,
    Breached,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
struct Obligation {
    contract_id: String,
    counterparty: String,
    obligation: String,
    due_date: String,
    status: ObligationStatus,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
struct ContractComplianceReport {
    monitor_id: String,
    event_id: String,
    contracts_reviewed: u32,
    obligations_total: u32,
    obligations_met: u32,
    compliance_rate: f64,
    obligations: Vec<Obligation>,
    alerts: Vec<String>,
    created_at: String,
}

fn contract_compliance(
    input: ContractComplianceInput,
    ctx: &mut AgentContext,
) -> anyhow::Result<ContractComplianceReport> {
    let contract_ids = input
        .contract_ids
        .filter(|ids| !ids.is_empty())
        .unwrap_or_else(|| vec!["CTR-VENUE".to_string(), "CTR-CATERING".to_string()]);

    const TEMPLATE: [(&str, &str, i64, ObligationStatus); 3] = [
        ("Venue", "Final headcount confirmation", 14, ObligationStatus::Pending),
        ("Catering", "Deposit payment of 30%", -5, ObligationStatus::Met),
        ("AV supplier", "Certificate of insurance on file", 3, ObligationStatus::AtRisk),
    ];

    let obligations: Vec<Obligation> = contract_ids
        .iter()
        .zip(TEMPLATE.iter().cycle())
        .map(|(contract_id, &(counterparty, obligation, offset, status))| Obligation {
            contract_id: contract_id.clone(),
            counterparty: counterparty.to_string(),
            obligation: obligation.to_string(),
            due_date: if offset >= 0 {
                ctx.days_ahead(offset)
            } else {
                ctx.days_ago(-offset)
            },
            status,
        })
        .collect();

    let met = obligations
        .iter()
        .filter(|o| o.status == ObligationStatus::Met)
        .count() as u32;
    let alerts = obligations
        .iter()
        .filter(|o| matches!(o.status, ObligationStatus::AtRisk | ObligationStatus::Breached))
        .map(|o| format!("{} ({}): {}", o.contract_id, o.counterparty, o.obligation))
        .collect();

    Ok(ContractComplianceReport {
        monitor_id: ctx.uuid_v4().to_string(),
        event_id: input.event_id,
        contracts_reviewed: contract_ids.len() as u32,
        obligations_total: obligations.len() as u32,
        obligations_met: met,
        compliance_rate: rate(met, obligations.len() as u32),
        obligations,
        alerts,
        created_at: ctx.timestamp(),
    })
}

// PRO-013

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
enum PrivacyRegulation {
    #[serde(rename = "GDPR")]
    Gdpr,
    #[serde(rename = "CCPA")]
    Ccpa,
    #[serde(rename = "PIPA")]
    Pipa,
    #[serde(rename = "PIPEDA")]
    Pipeda,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct PrivacyInput {
    event_id: String,
    regulations: Option<Vec<PrivacyRegulation>>,
    data_categories: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
struct RegulationStatus {
    regulation: PrivacyRegulation,
    compliance_score: f64,
    open_items: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
struct ConsentMetrics {
    total_records: u32,
    with_valid_consent: u32,
    consent_rate: f64,
    withdrawal_requests: u32,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
struct PrivacyReport {
    privacy_assessment_id: String,
    event_id: String,
    regulation_status: Vec<RegulationStatus>,
    data_categories: Vec<String>,
    consent_metrics: ConsentMetrics,
    data_subject_requests_open: u32,
    recommendations: Vec<String>,
    created_at: String,
}

fn privacy_compliance(
    input: PrivacyInput,
    ctx: &mut AgentContext,
) -> anyhow::Result<PrivacyReport> {
    let regulations = input
        .regulations
        .filter(|list| !list.is_empty())
        .unwrap_or_else(|| vec![PrivacyRegulation::Pipa, PrivacyRegulation::Gdpr]);

    let regulation_status = regulations
        .into_iter()
        .map(|regulation| {
            let (score, open): (f64, &[&str]) = match regulation {
                PrivacyRegulation::Gdpr => (88.0, &["Record of processing for badge scanning"]),
                PrivacyRegulation::Ccpa => (92.0, &["'Do not sell' link on registration site"]),
                PrivacyRegulation::Pipa => (90.0, &["Separate consent for overseas transfer"]),
                PrivacyRegulation::Pipeda => (94.0, &[]),
            };
            RegulationStatus {
                regulation,
                compliance_score: score,
                open_items: open.iter().map(|item| item.to_string()).collect(),
            }
        })
        .collect();

    Ok(PrivacyReport {
        privacy_assessment_id: ctx.uuid_v4().to_string(),
        event_id: input.event_id,
        regulation_status,
        data_categories: input.data_categories.unwrap_or_else(|| {
            vec!["contact details".into(), "dietary requirements".into(), "badge scans".into()]
        }),
        consent_metrics: ConsentMetrics {
            total_records: 2400,
            with_valid_consent: 2316,
            consent_rate: rate(2316, 2400),
            withdrawal_requests: 12,
        },
        data_subject_requests_open: 3,
        recommendations: vec![
            "Purge attendee records 12 months after the event".into(),
            "Sign data processing agreements with all lead retrieval vendors".into(),
        ],
        created_at: ctx.timestamp(),
    })
}

// PRO-014

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
enum AssetType {
    Trademark,
    Copyright,
    Recording,
    SpeakerContent,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct IpInput {
    event_id: String,
    asset_types: Option<Vec<AssetType>>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
enum ProtectionStatus {
    Protected,
    Pending,
    Unprotected,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
struct IpAsset {
    asset_id: String,
    asset_type: AssetType,
    description: String,
    protection_status: ProtectionStatus,
    licensing_notes: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
struct IpReport {
    ip_review_id: String,
    event_id: String,
    assets: Vec<IpAsset>,
    infringement_alerts: u32,
    recommendations: Vec<String>,
    created_at: String,
}

fn intellectual_property(input: IpInput, ctx: &mut AgentContext) -> anyhow::Result<IpReport> {
    let types = input
        .asset_types
        .filter(|types| !types.is_empty())
        .unwrap_or_else(|| {
            vec![
                AssetType::Trademark,
                AssetType::Recording,
                AssetType::SpeakerContent,
            ]
        });

    let assets = types
        .into_iter()
        .map(|asset_type| {
            let (description, status, notes) = match asset_type {
                AssetType::Trademark => (
                    "Event name and logo",
                    ProtectionStatus::Protected,
                    "Sponsor use limited to approved lockups",
                ),
                AssetType::Copyright => (
                    "Printed programme and signage artwork",
                    ProtectionStatus::Protected,
                    "Designer assignment agreement on file",
                ),
                AssetType::Recording => (
                    "Session video recordings",
                    ProtectionStatus::Pending,
                    "Speaker release forms 80% collected",
                ),
                AssetType::SpeakerContent => (
                    "Slides and handouts",
                    ProtectionStatus::Unprotected,
                    "No licence granted for post-event distribution",
                ),
            };
            IpAsset {
                asset_id: ctx.short_id("IP"),
                asset_type,
                description: description.to_string(),
                protection_status: status,
                licensing_notes: notes.to_string(),
            }
        })
        .collect();

    Ok(IpReport {
        ip_review_id: ctx.uuid_v4().to_string(),
        event_id: input.event_id,
        assets,
        infringement_alerts: 1,
        recommendations: vec![
            "Add a content licence clause to the speaker agreement".into(),
            "Watermark session recordings before publishing".into(),
        ],
        created_at: ctx.timestamp(),
    })
}

// PRO-015

#[derive(Debug, Deserialize, JsonSchema)]
struct RegulatoryInput {
    event_id: String,
    venue_location: Option<String>,
    event_activities: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
enum PermitStatus {
    Obtained,
    Applied,
    Required,
    NotRequired,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
struct PermitRequirement {
    permit: String,
    authority: String,
    status: PermitStatus,
    deadline: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
struct RegulatoryReport {
    regulatory_review_id: String,
    event_id: String,
    venue_location: String,
    permits: Vec<PermitRequirement>,
    outstanding_permits: u32,
    compliance_score: f64,
    activities_reviewed: Vec<String>,
    created_at: String,
}

fn regulatory_compliance(
    input: RegulatoryInput,
    ctx: &mut AgentContext,
) -> anyhow::Result<RegulatoryReport> {
    let permits: Vec<PermitRequirement> = [
        ("Temporary event licence", "City council", PermitStatus::Obtained, 0),
        ("Liquor licence", "Licensing board", PermitStatus::Applied, 21),
        ("Fire safety inspection", "Fire department", PermitStatus::Required, 10),
        ("Food handling permit", "Health department", PermitStatus::Obtained, 0),
    ]
    .into_iter()
    .map(|(permit, authority, status, days)| PermitRequirement {
        permit: permit.to_string(),
        authority: authority.to_string(),
        status,
        deadline: ctx.days_ahead(days),
    })
    .collect();

    let outstanding = permits
        .iter()
        .filter(|p| matches!(p.status, PermitStatus::Applied | PermitStatus::Required))
        .count() as u32;
    let satisfied = permits.len() as u32 - outstanding;

    Ok(RegulatoryReport {
        regulatory_review_id: ctx.uuid_v4().to_string(),
        event_id: input.event_id,
        venue_location: input.venue_location.unwrap_or_else(|| "Seoul, KR".to_string()),
        compliance_score: rate(satisfied, permits.len() as u32),
        outstanding_permits: outstanding,
        permits,
        activities_reviewed: input.event_activities.unwrap_or_default(),
        created_at: ctx.timestamp(),
    })
}

// PRO-016

#[derive(Debug, Deserialize, JsonSchema)]
struct CertificationInput {
    event_id: String,
    professional_id: Option<String>,
    target_certifications: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
enum CertificationState {
    Active,
    ExpiringSoon,
    Expired,
    InProgress,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
struct Certification {
    name: String,
    issuer: String,
    status: CertificationState,
    expiry_date: Option<String>,
    ce_hours_required: u32,
    ce_hours_earned: u32,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
struct CertificationReport {
    certification_plan_id: String,
    event_id: String,
    professional_id: Option<String>,
    certifications: Vec<Certification>,
    upcoming_deadlines: Vec<String>,
    created_at: String,
}

fn certification_management(
    input: CertificationInput,
    ctx: &mut AgentContext,
) -> anyhow::Result<CertificationReport> {
    let mut certifications = vec![
        Certification {
            name: "CMP".into(),
            issuer: "Events Industry Council".into(),
            status: CertificationState::ExpiringSoon,
            expiry_date: Some(ctx.days_ahead(60)),
            ce_hours_required: 25,
            ce_hours_earned: 18,
        },
        Certification {
            name: "CSEP".into(),
            issuer: "International Live Events Association".into(),
            status: CertificationState::Active,
            expiry_date: Some(ctx.days_ahead(400)),
            ce_hours_required: 0,
            ce_hours_earned: 0,
        },
    ];
    for target in input.target_certifications.unwrap_or_default() {
        if certifications.iter().all(|c| !c.name.eq_ignore_ascii_case(&target)) {
            certifications.push(Certification {
                name: target,
                issuer: "To be confirmed".into(),
                status: CertificationState::InProgress,
                expiry_date: None,
                ce_hours_required: 0,
                ce_hours_earned: 0,
            });
        }
    }

    let upcoming_deadlines = certifications
        .iter()
        .filter(|c| matches!(c.status, CertificationState::ExpiringSoon))
        .map(|c| {
            format!(
                "{} renewal: {} CE hours still needed",
                c.name,
                c.ce_hours_required.saturating_sub(c.ce_hours_earned)
            )
        })
        .collect();

    Ok(CertificationReport {
        certification_plan_id: ctx.uuid_v4().to_string(),
        event_id: input.event_id,
        professional_id: input.professional_id,
        certifications,
        upcoming_deadlines,
        created_at: ctx.timestamp(),
    })
}

// PRO-017

#[derive(Debug, Deserialize, JsonSchema)]
struct EducationInput {
    event_id: String,
    tracking_period: Option<DateWindow>,
    required_hours: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
struct EducationActivity {
    title: String,
    provider: String,
    hours: u32,
    completed_on: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
struct EducationReport {
    tracking_id: String,
    event_id: String,
    tracking_period: DateWindow,
    hours_required: u32,
    hours_completed: u32,
    completion_rate: f64,
    on_track: bool,
    activities: Vec<EducationActivity>,
    suggested_courses: Vec<String>,
    created_at: String,
}

fn continuing_education(
    input: EducationInput,
    ctx: &mut AgentContext,
) -> anyhow::Result<EducationReport> {
    let activities: Vec<EducationActivity> = [
        ("Risk management for large events", "EIC", 6, 120),
        ("Sustainable event design", "ISO academy", 4, 75),
        ("Negotiating venue contracts", "MPI", 3, 20),
    ]
    .into_iter()
    .map(|(title, provider, hours, days)| EducationActivity {
        title: title.to_string(),
        provider: provider.to_string(),
        hours,
        completed_on: ctx.days_ago(days),
    })
    .collect();

    let hours_required = input.required_hours.unwrap_or(25);
    let hours_completed: u32 = activities.iter().map(|a| a.hours).sum();

    Ok(EducationReport {
        tracking_id: ctx.uuid_v4().to_string(),
        event_id: input.event_id,
        tracking_period: input.tracking_period.unwrap_or_else(|| DateWindow {
            start_date: ctx.days_ago(365),
            end_date: ctx.timestamp(),
        }),
        hours_required,
        hours_completed,
        completion_rate: rate(hours_completed.min(hours_required), hours_required),
        on_track: hours_completed * 2 >= hours_required,
        activities,
        suggested_courses: vec![
            "Crisis communication for event teams".into(),
            "Accessibility by design".into(),
        ],
        created_at: ctx.timestamp(),
    })
}

// PRO-018

#[derive(Debug, Deserialize, JsonSchema)]
struct SelfDevelopmentInput {
    event_id: String,
    professional_id: Option<String>,
    focus_areas: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
struct SkillGap {
    skill: String,
    current_level: u8,
    target_level: u8,
    priority: Priority,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
struct Milestone {
    description: String,
    target_date: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
struct DevelopmentPlan {
    plan_id: String,
    event_id: String,
    professional_id: Option<String>,
    skill_gaps: Vec<SkillGap>,
    milestones: Vec<Milestone>,
    progress_trend: Trend,
    created_at: String,
}

fn self_development(
    input: SelfDevelopmentInput,
    ctx: &mut AgentContext,
) -> anyhow::Result<DevelopmentPlan> {
    let focus_areas = input
        .focus_areas
        .filter(|areas| !areas.is_empty())
        .unwrap_or_else(|| {
            vec![
                "Budget forecasting".to_string(),
                "Stakeholder negotiation".to_string(),
                "Digital event platforms".to_string(),
            ]
        });

    let skill_gaps: Vec<SkillGap> = focus_areas
        .into_iter()
        .enumerate()
        .map(|(rank, skill)| SkillGap {
            skill,
            current_level: 2 + (rank % 2) as u8,
            target_level: 4,
            priority: match rank {
                0 => Priority::High,
                1 => Priority::Medium,
                _ => Priority::Low,
            },
        })
        .collect();

    let milestones = skill_gaps
        .iter()
        .zip(1i64..)
        .map(|(gap, quarter)| Milestone {
            description: format!("Reach level {} in {}", gap.target_level, gap.skill),
            target_date: ctx.days_ahead(90 * quarter),
        })
        .collect();

    Ok(DevelopmentPlan {
        plan_id: ctx.uuid_v4().to_string(),
        event_id: input.event_id,
        professional_id: input.professional_id,
        skill_gaps,
        milestones,
        progress_trend: Trend::Improving,
        created_at: ctx.timestamp(),
    })
}

// PRO-019

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
enum MentorshipFormat {
    OneOnOne,
    Group,
    Peer,
    Reverse,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct MentorshipInput {
    event_id: String,
    program_type: Option<MentorshipFormat>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
struct MentorshipPair {
    pair_id: String,
    mentor_expertise: String,
    mentee_goal: String,
    sessions_held: u32,
    satisfaction: f64,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
struct MentorshipReport {
    program_id: String,
    event_id: String,
    program_type: MentorshipFormat,
    active_pairs: u32,
    average_satisfaction: f64,
    pairs: Vec<MentorshipPair>,
    recommendations: Vec<String>,
    created_at: String,
}

fn mentorship_program(
    input: MentorshipInput,
    ctx: &mut AgentContext,
) -> anyhow::Result<MentorshipReport> {
    let pairs: Vec<MentorshipPair> = [
        ("Sponsorship sales", "Close first sponsorship package", 6, 4.6),
        ("Venue sourcing", "Lead a city-wide site selection", 4, 4.2),
        ("Event technology", "Run a hybrid event end to end", 5, 4.8),
    ]
    .into_iter()
    .map(|(expertise, goal, sessions, satisfaction)| MentorshipPair {
        pair_id: ctx.short_id("MNT"),
        mentor_expertise: expertise.to_string(),
        mentee_goal: goal.to_string(),
        sessions_held: sessions,
        satisfaction,
    })
    .collect();

    let average_satisfaction =
        pairs.iter().map(|p| p.satisfaction).sum::<f64>() / pairs.len().max(1) as f64;

    Ok(MentorshipReport {
        program_id: ctx.uuid_v4().to_string(),
        event_id: input.event_id,
        program_type: input.program_type.unwrap_or(MentorshipFormat::OneOnOne),
        active_pairs: pairs.len() as u32,
        average_satisfaction: (average_satisfaction * 10.0).round() / 10.0,
        pairs,
        recommendations: vec![
            "Hold a mid-programme check-in for every pair".into(),
            "Recruit mentors with hybrid event experience".into(),
        ],
        created_at: ctx.timestamp(),
    })
}

// PRO-020

#[derive(Debug, Deserialize, JsonSchema)]
struct CareerInput {
    event_id: String,
    professional_id: Option<String>,
    current_role: Option<String>,
    target_role: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
struct CareerStep {
    step: u32,
    action: String,
    timeline_months: u32,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
struct CareerPlan {
    career_plan_id: String,
    event_id: String,
    professional_id: Option<String>,
    current_role: String,
    target_role: String,
    readiness_score: f64,
    pathway: Vec<CareerStep>,
    market_outlook: Trend,
    created_at: String,
}

fn career_development(input: CareerInput, ctx: &mut AgentContext) -> anyhow::Result<CareerPlan> {
    let pathway = [
        ("Lead a flagship event as project owner", 6),
        ("Complete CMP certification", 12),
        ("Manage a team of three or more planners", 18),
    ]
    .into_iter()
    .zip(1u32..)
    .map(|((action, months), step)| CareerStep {
        step,
        action: action.to_string(),
        timeline_months: months,
    })
    .collect();

    Ok(CareerPlan {
        career_plan_id: ctx.uuid_v4().to_string(),
        event_id: input.event_id,
        professional_id: input.professional_id,
        current_role: input.current_role.unwrap_or_else(|| "Event Coordinator".to_string()),
        target_role: input.target_role.unwrap_or_else(|| "Senior Event Manager".to_string()),
        readiness_score: 68.0,
        pathway,
        market_outlook: Trend::Improving,
        created_at: ctx.timestamp(),
    })
}
