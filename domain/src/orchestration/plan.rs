//! Execution plan construction from department dependencies
//!
//! The plan groups departments into tiers: everything in one tier may run
//! concurrently, and every dependency of a department sits in a strictly
//! earlier tier. Plan construction is the last point where a structural
//! error can surface; once a plan exists, execution only ever degrades
//! per department, never fails as a whole.

use super::node::DepartmentNode;
use crate::core::department::Department;
use crate::core::error::DomainError;
use crate::routing::relevance::RoutingDecision;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Tiers of departments safe to run concurrently
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionPlan {
    pub tiers: Vec<Vec<Department>>,
    dependencies: HashMap<Department, Vec<Department>>,
}

impl ExecutionPlan {
    /// Build a plan from routed departments and their declared dependencies
    ///
    /// Dependencies naming a known department that was not selected are
    /// pruned: the dependent can still run, it just has less upstream
    /// context. Dependencies naming an unknown department are a structural
    /// error, as is any cycle. No partial plan is ever produced.
    pub fn build(
        routing: &RoutingDecision,
        declarations: &HashMap<Department, Vec<Department>>,
    ) -> Result<Self, DomainError> {
        let selected = routing.selected();
        if selected.is_empty() {
            return Err(DomainError::NoDepartments);
        }

        let selected_set: HashSet<Department> =
            selected.iter().map(|r| r.department.clone()).collect();

        let mut dependencies: HashMap<Department, Vec<Department>> = HashMap::new();
        let mut nodes: Vec<DepartmentNode> = Vec::new();

        for relevance in &selected {
            let declared = declarations
                .get(&relevance.department)
                .cloned()
                .unwrap_or_else(|| relevance.department.default_dependencies());

            for dep in &declared {
                if !dep.is_known() && !selected_set.contains(dep) {
                    return Err(DomainError::UnknownDependency {
                        department: relevance.department.to_string(),
                        dependency: dep.to_string(),
                    });
                }
            }

            let pruned: Vec<Department> = declared
                .into_iter()
                .filter(|dep| selected_set.contains(dep))
                .collect();
            dependencies.insert(relevance.department.clone(), pruned.clone());
            nodes.push(DepartmentNode::new(relevance, pruned));
        }

        let mut tiers: Vec<Vec<Department>> = Vec::new();
        let mut placed: HashSet<Department> = HashSet::new();
        let mut remaining: Vec<DepartmentNode> = nodes;

        while !remaining.is_empty() {
            let (ready, blocked): (Vec<_>, Vec<_>) = remaining
                .into_iter()
                .partition(|node| node.dependencies.iter().all(|dep| placed.contains(dep)));

            if ready.is_empty() {
                let cycle: Vec<String> =
                    blocked.iter().map(|n| n.department.to_string()).collect();
                return Err(DomainError::DependencyCycle(cycle));
            }

            for node in &ready {
                placed.insert(node.department.clone());
            }
            tiers.push(ready.into_iter().map(|n| n.department).collect());
            remaining = blocked;
        }

        Ok(Self { tiers, dependencies })
    }

    /// Pruned dependencies of a planned department
    pub fn dependencies_of(&self, department: &Department) -> &[Department] {
        self.dependencies
            .get(department)
            .map(|deps| deps.as_slice())
            .unwrap_or(&[])
    }

    pub fn department_count(&self) -> usize {
        self.tiers.iter().map(|t| t.len()).sum()
    }

    pub fn tier_of(&self, department: &Department) -> Option<usize> {
        self.tiers.iter().position(|t| t.contains(department))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::request::ProductionRequest;
    use crate::routing::relevance::{classify_departments, RELEVANCE_FLOOR};

    fn routing(scores: &[(Department, f64)]) -> RoutingDecision {
        let request = ProductionRequest::new("proj-1", "brief");
        classify_departments(&request, scores, RELEVANCE_FLOOR).unwrap()
    }

    fn declarations(pairs: &[(Department, Vec<Department>)]) -> HashMap<Department, Vec<Department>> {
        pairs.iter().cloned().collect()
    }

    #[test]
    fn test_independent_departments_share_one_tier() {
        let routing = routing(&[(Department::Story, 0.9), (Department::Character, 0.8)]);
        let decls = declarations(&[
            (Department::Story, vec![]),
            (Department::Character, vec![]),
        ]);
        let plan = ExecutionPlan::build(&routing, &decls).unwrap();
        assert_eq!(plan.tiers.len(), 1);
        assert_eq!(plan.tiers[0].len(), 2);
    }

    #[test]
    fn test_dependent_department_lands_in_later_tier() {
        let routing = routing(&[
            (Department::Story, 0.9),
            (Department::Character, 0.8),
            (Department::Visual, 0.7),
        ]);
        let decls = declarations(&[
            (Department::Story, vec![]),
            (Department::Character, vec![]),
            (Department::Visual, vec![Department::Character]),
        ]);
        let plan = ExecutionPlan::build(&routing, &decls).unwrap();

        assert_eq!(plan.tiers.len(), 2);
        assert!(plan.tiers[0].contains(&Department::Story));
        assert!(plan.tiers[0].contains(&Department::Character));
        assert_eq!(plan.tiers[1], vec![Department::Visual]);
    }

    #[test]
    fn test_every_dependency_in_strictly_earlier_tier() {
        let routing = routing(&[
            (Department::Story, 0.9),
            (Department::Character, 0.8),
            (Department::Visual, 0.7),
            (Department::Audio, 0.6),
            (Department::Video, 0.5),
        ]);
        let plan = ExecutionPlan::build(&routing, &HashMap::new()).unwrap();

        for tier in &plan.tiers {
            for dept in tier {
                let own_tier = plan.tier_of(dept).unwrap();
                for dep in plan.dependencies_of(dept) {
                    assert!(plan.tier_of(dep).unwrap() < own_tier);
                }
            }
        }
        assert_eq!(plan.department_count(), 5);
    }

    #[test]
    fn test_cycle_is_fatal_with_no_partial_plan() {
        let routing = routing(&[(Department::Story, 0.9), (Department::Character, 0.8)]);
        let decls = declarations(&[
            (Department::Story, vec![Department::Character]),
            (Department::Character, vec![Department::Story]),
        ]);
        let result = ExecutionPlan::build(&routing, &decls);

        match result {
            Err(DomainError::DependencyCycle(members)) => {
                assert!(members.contains(&"story".to_string()));
                assert!(members.contains(&"character".to_string()));
            }
            other => panic!("expected cycle error, got {:?}", other.map(|p| p.tiers)),
        }
    }

    #[test]
    fn test_dependency_on_unselected_department_is_pruned() {
        // Visual depends on character, but character was not routed in.
        let routing = routing(&[(Department::Story, 0.9), (Department::Visual, 0.7)]);
        let plan = ExecutionPlan::build(&routing, &HashMap::new()).unwrap();

        assert_eq!(plan.tiers.len(), 1);
        assert!(plan.dependencies_of(&Department::Visual).is_empty());
    }

    #[test]
    fn test_unknown_dependency_is_fatal() {
        let routing = routing(&[(Department::Story, 0.9)]);
        let decls = declarations(&[(
            Department::Story,
            vec![Department::Custom("mystery".into())],
        )]);
        let result = ExecutionPlan::build(&routing, &decls);
        assert!(matches!(
            result,
            Err(DomainError::UnknownDependency { .. })
        ));
    }

    #[test]
    fn test_default_declarations_order_video_last() {
        let routing = routing(&[
            (Department::Story, 0.9),
            (Department::Visual, 0.8),
            (Department::Character, 0.7),
            (Department::Audio, 0.6),
            (Department::Video, 0.5),
        ]);
        let plan = ExecutionPlan::build(&routing, &HashMap::new()).unwrap();

        let video_tier = plan.tier_of(&Department::Video).unwrap();
        let visual_tier = plan.tier_of(&Department::Visual).unwrap();
        let audio_tier = plan.tier_of(&Department::Audio).unwrap();
        assert!(visual_tier < video_tier);
        assert!(audio_tier < video_tier);
    }
}
