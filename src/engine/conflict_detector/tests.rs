use super::{is_same_venue, ConflictDetector, TRAVEL_BUFFER_MINUTES};
use crate::domain::screening::ScreeningSlot;
use crate::domain::types::ConflictSeverity;
use chrono::DateTime;

// ==========================================
// 测试辅助函数
// ==========================================

fn slot(id: &str, start: &str, duration: i64, venue: &str) -> ScreeningSlot {
    ScreeningSlot::new(
        id,
        DateTime::parse_from_rfc3339(start).unwrap(),
        duration,
        venue,
    )
}

// ==========================================
// 正常案例
// ==========================================

#[test]
fn test_overlap_is_impossible() {
    let detector = ConflictDetector::new();
    let a = slot("a", "2025-03-15T14:00:00+01:00", 120, "V1");
    let b = slot("b", "2025-03-15T15:00:00+01:00", 90, "V2");

    let conflicts = detector.detect_conflicts(&[a, b]);

    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].severity, ConflictSeverity::Impossible);
    assert_eq!(conflicts[0].overlap_minutes, 60.0);
    assert_eq!(conflicts[0].a, "a");
    assert_eq!(conflicts[0].b, "b");
}

#[test]
fn test_overlap_same_venue_is_still_impossible() {
    let detector = ConflictDetector::new();
    let a = slot("a", "2025-03-15T14:00:00+01:00", 120, "V1");
    let b = slot("b", "2025-03-15T15:00:00+01:00", 90, "V1");

    let conflicts = detector.detect_conflicts(&[a, b]);

    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].severity, ConflictSeverity::Impossible);
}

#[test]
fn test_tight_transfer_is_warning() {
    let detector = ConflictDetector::new();
    // A 20:00-21:30 @X, B 21:45 @Y
    let a = slot("a", "2025-03-15T20:00:00+01:00", 90, "X");
    let b = slot("b", "2025-03-15T21:45:00+01:00", 100, "Y");

    let conflicts = detector.detect_conflicts(&[a, b]);

    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].severity, ConflictSeverity::Warning);
    assert_eq!(conflicts[0].overlap_minutes, 0.0);
}

#[test]
fn test_tight_transfer_same_venue_is_exempt() {
    let detector = ConflictDetector::new();
    let a = slot("a", "2025-03-15T20:00:00+01:00", 90, "X");
    let b = slot("b", "2025-03-15T21:45:00+01:00", 100, "X");

    assert!(detector.detect_conflicts(&[a, b]).is_empty());
}

#[test]
fn test_sufficient_gap_is_exempt() {
    let detector = ConflictDetector::new();
    let a = slot("a", "2025-03-15T20:00:00+01:00", 90, "X");
    let b = slot("b", "2025-03-15T22:15:00+01:00", 100, "Y");

    assert!(detector.detect_conflicts(&[a, b]).is_empty());
}

// ==========================================
// 边界案例
// ==========================================

#[test]
fn test_gap_exactly_buffer_is_not_warning() {
    let detector = ConflictDetector::new();
    let a = slot("a", "2025-03-15T20:00:00+01:00", 90, "X");
    let b = slot("b", "2025-03-15T22:00:00+01:00", 100, "Y");

    assert_eq!(TRAVEL_BUFFER_MINUTES, 30.0);
    assert!(detector.detect_conflicts(&[a, b]).is_empty());
}

#[test]
fn test_back_to_back_different_venue_is_warning() {
    let detector = ConflictDetector::new();
    let a = slot("a", "2025-03-15T20:00:00+01:00", 90, "X");
    let b = slot("b", "2025-03-15T21:30:00+01:00", 90, "Y");

    let conflicts = detector.detect_conflicts(&[a, b]);

    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].severity, ConflictSeverity::Warning);
}

#[test]
fn test_back_to_back_same_venue_is_exempt() {
    let detector = ConflictDetector::new();
    let a = slot("a", "2025-03-15T20:00:00+01:00", 90, "X");
    let b = slot("b", "2025-03-15T21:30:00+01:00", 90, "X");

    assert!(detector.detect_conflicts(&[a, b]).is_empty());
}

#[test]
fn test_symmetry_of_input_order() {
    let detector = ConflictDetector::new();
    let pairs = [
        (
            slot("a", "2025-03-15T14:00:00+01:00", 120, "V1"),
            slot("b", "2025-03-15T15:00:00+01:00", 90, "V2"),
        ),
        (
            slot("a", "2025-03-15T20:00:00+01:00", 90, "X"),
            slot("b", "2025-03-15T21:45:00+01:00", 100, "Y"),
        ),
    ];

    for (a, b) in pairs {
        let forward = detector.detect_conflicts(&[a.clone(), b.clone()]);
        let backward = detector.detect_conflicts(&[b, a]);
        assert_eq!(forward.len(), 1);
        assert_eq!(backward.len(), 1);
        assert_eq!(forward[0].severity, backward[0].severity);
        assert_eq!(forward[0].overlap_minutes, backward[0].overlap_minutes);
        // 先出现者记为 a
        assert_eq!(backward[0].a, "b");
    }
}

#[test]
fn test_empty_and_single_have_no_conflicts() {
    let detector = ConflictDetector::new();
    let empty: Vec<ScreeningSlot> = Vec::new();
    assert!(detector.detect_conflicts(&empty).is_empty());

    let single = vec![slot("a", "2025-03-15T14:00:00+01:00", 120, "V1")];
    assert!(detector.detect_conflicts(&single).is_empty());
}

#[test]
fn test_unresolved_venues_never_match() {
    assert!(!is_same_venue("", ""));
    assert!(!is_same_venue("", "V1"));
    assert!(is_same_venue("V1", "V1"));
    assert!(!is_same_venue("V1", "v1"));

    let detector = ConflictDetector::new();
    let a = slot("a", "2025-03-15T20:00:00+01:00", 90, "");
    let b = slot("b", "2025-03-15T21:40:00+01:00", 90, "");
    let conflicts = detector.detect_conflicts(&[a, b]);

    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].severity, ConflictSeverity::Warning);
}

#[test]
fn test_three_way_conflicts_are_not_merged() {
    let detector = ConflictDetector::new();
    let a = slot("a", "2025-03-15T14:00:00+01:00", 120, "V1");
    let b = slot("b", "2025-03-15T15:00:00+01:00", 120, "V1");
    let c = slot("c", "2025-03-15T15:30:00+01:00", 120, "V1");

    let conflicts = detector.detect_conflicts(&[a, b, c]);

    assert_eq!(conflicts.len(), 3);
    assert!(conflicts.iter().all(|c| c.severity == ConflictSeverity::Impossible));
    assert_eq!(detector.conflicts_for("a", &conflicts).len(), 2);
    assert_eq!(detector.conflicts_for("c", &conflicts).len(), 2);
}

// ==========================================
// 候选场次预判
// ==========================================

#[test]
fn test_would_conflict_only_returns_candidate_conflicts() {
    let detector = ConflictDetector::new();
    // 已选集合内部本身就有冲突
    let existing = vec![
        slot("a", "2025-03-15T14:00:00+01:00", 120, "V1"),
        slot("b", "2025-03-15T15:00:00+01:00", 90, "V1"),
        slot("c", "2025-03-15T20:00:00+01:00", 90, "X"),
    ];
    let snapshot = existing.clone();
    let candidate = slot("cand", "2025-03-15T21:45:00+01:00", 90, "Y");

    let conflicts = detector.would_conflict(&existing, &candidate);

    assert_eq!(existing, snapshot);
    assert_eq!(conflicts.len(), 1);
    assert!(conflicts.iter().all(|c| c.involves("cand")));
    assert_eq!(conflicts[0].a, "c");
    assert_eq!(conflicts[0].b, "cand");
    assert_eq!(conflicts[0].severity, ConflictSeverity::Warning);
}

#[test]
fn test_would_conflict_matches_full_detection() {
    let detector = ConflictDetector::new();
    let existing = vec![
        slot("a", "2025-03-15T14:00:00+01:00", 120, "V1"),
        slot("b", "2025-03-15T17:00:00+01:00", 90, "V2"),
    ];
    let candidate = slot("cand", "2025-03-15T15:30:00+01:00", 60, "V3");

    let predicted = detector.would_conflict(&existing, &candidate);

    let mut merged = existing.clone();
    merged.push(candidate.clone());
    let full = detector.conflicts_for("cand", &detector.detect_conflicts(&merged));

    assert_eq!(predicted, full);
}

#[test]
fn test_would_conflict_with_unresolved_candidate_venue() {
    let detector = ConflictDetector::new();
    let existing = vec![slot("a", "2025-03-15T20:00:00+01:00", 90, "X")];
    let candidate = slot("cand", "2025-03-15T21:40:00+01:00", 90, "");

    let conflicts = detector.would_conflict(&existing, &candidate);

    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].severity, ConflictSeverity::Warning);
}

#[test]
fn test_would_conflict_skips_already_selected_candidate() {
    let detector = ConflictDetector::new();
    let existing = vec![slot("a", "2025-03-15T20:00:00+01:00", 90, "X")];
    let candidate = existing[0].clone();

    assert!(detector.would_conflict(&existing, &candidate).is_empty());
}

#[test]
fn test_would_conflict_on_empty_set() {
    let detector = ConflictDetector::new();
    let existing: Vec<ScreeningSlot> = Vec::new();
    let candidate = slot("cand", "2025-03-15T21:40:00+01:00", 90, "X");

    assert!(detector.would_conflict(&existing, &candidate).is_empty());
}
