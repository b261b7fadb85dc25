//! Kinship graph view and shortest-path resolution

use crate::lineage::Lineage;
use crate::person::PersonId;
use crate::relation::{KinPath, KinRelation, PathStep};
use std::collections::{HashMap, HashSet, VecDeque};

/// On-demand adjacency view over a lineage snapshot
///
/// Nothing is materialized or cached: every query derives edges from the
/// borrowed snapshot, so a fresh view over the current collection is always
/// consistent with it.
pub struct KinshipGraph<'a> {
    lineage: &'a Lineage,
}

impl<'a> KinshipGraph<'a> {
    pub fn new(lineage: &'a Lineage) -> Self {
        Self { lineage }
    }

    /// All neighbor edges of a person
    ///
    /// Emission order is fixed and load-bearing for path tie-breaking:
    /// father, mother, spouse, children (collection order), siblings
    /// (collection order). A spouse edge is emitted whether the subject
    /// points at the neighbor or the neighbor points at the subject.
    /// An id with no record yields no edges.
    pub fn neighbors(&self, id: &PersonId) -> Vec<(PersonId, KinRelation)> {
        let Some(person) = self.lineage.find(id) else {
            return Vec::new();
        };

        let mut edges = Vec::new();
        let mut seen: HashSet<(PersonId, KinRelation)> = HashSet::new();

        if let Some(father_id) = &person.father_id {
            push_unique(&mut edges, &mut seen, father_id.clone(), KinRelation::Father);
        }
        if let Some(mother_id) = &person.mother_id {
            push_unique(&mut edges, &mut seen, mother_id.clone(), KinRelation::Mother);
        }

        if let Some(spouse_id) = &person.spouse_id {
            push_unique(&mut edges, &mut seen, spouse_id.clone(), KinRelation::Spouse);
        }
        for other in self.lineage.iter() {
            if other.spouse_id.as_ref() == Some(id) && &other.id != id {
                push_unique(&mut edges, &mut seen, other.id.clone(), KinRelation::Spouse);
            }
        }

        for other in self.lineage.iter() {
            if other.father_id.as_ref() == Some(id) || other.mother_id.as_ref() == Some(id) {
                push_unique(&mut edges, &mut seen, other.id.clone(), KinRelation::Child);
            }
        }

        if person.father_id.is_some() || person.mother_id.is_some() {
            for other in self.lineage.iter() {
                if &other.id == id {
                    continue;
                }
                let shares_father =
                    person.father_id.is_some() && other.father_id == person.father_id;
                let shares_mother =
                    person.mother_id.is_some() && other.mother_id == person.mother_id;
                if shares_father || shares_mother {
                    push_unique(&mut edges, &mut seen, other.id.clone(), KinRelation::Sibling);
                }
            }
        }

        edges
    }

    /// Shortest path between two persons, if one exists
    ///
    /// Breadth-first search over the derived edges. The visited set
    /// guarantees termination on cyclic data (spouse and sibling edges
    /// always form cycles). Returns the empty path when start and end are
    /// the same id, and `None` when the end is unreachable. For a fixed
    /// snapshot, repeated calls return the identical path.
    pub fn find_path(&self, start: &PersonId, end: &PersonId) -> Option<KinPath> {
        if start == end {
            return Some(KinPath::default());
        }

        let mut visited: HashSet<PersonId> = HashSet::from([start.clone()]);
        let mut parent: HashMap<PersonId, (PersonId, KinRelation)> = HashMap::new();
        let mut queue: VecDeque<PersonId> = VecDeque::from([start.clone()]);

        while let Some(current) = queue.pop_front() {
            for (next, relation) in self.neighbors(&current) {
                if !visited.insert(next.clone()) {
                    continue;
                }
                parent.insert(next.clone(), (current.clone(), relation));
                if &next == end {
                    let path = reconstruct_path(start, end, &parent);
                    tracing::debug!(
                        start = %start,
                        end = %end,
                        hops = path.hops(),
                        "kinship path found"
                    );
                    return Some(path);
                }
                queue.push_back(next);
            }
        }

        tracing::debug!(start = %start, end = %end, "no kinship path");
        None
    }
}

fn push_unique(
    edges: &mut Vec<(PersonId, KinRelation)>,
    seen: &mut HashSet<(PersonId, KinRelation)>,
    id: PersonId,
    relation: KinRelation,
) {
    if seen.insert((id.clone(), relation)) {
        edges.push((id, relation));
    }
}

/// Walk the parent map back from end to start and reverse
fn reconstruct_path(
    start: &PersonId,
    end: &PersonId,
    parent: &HashMap<PersonId, (PersonId, KinRelation)>,
) -> KinPath {
    let mut steps = Vec::new();
    let mut current = end.clone();

    while &current != start {
        match parent.get(&current) {
            Some((prev, relation)) => {
                steps.push(PathStep::new(current.clone(), *relation));
                current = prev.clone();
            }
            None => break,
        }
    }

    steps.reverse();
    KinPath::new(steps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::person::{Gender, Person};

    /// The three-person household used throughout: A and B married,
    /// C their son.
    fn small_family() -> Lineage {
        Lineage::from_people(vec![
            Person::new("Arun", "Verma", Gender::Male).with_id("A"),
            Person::new("Bina", "Verma", Gender::Female)
                .with_id("B")
                .with_spouse("A"),
            Person::new("Chetan", "Verma", Gender::Male)
                .with_id("C")
                .with_father("A")
                .with_mother("B"),
        ])
    }

    fn path_of(lineage: &Lineage, from: &str, to: &str) -> Option<Vec<(String, KinRelation)>> {
        KinshipGraph::new(lineage)
            .find_path(&from.into(), &to.into())
            .map(|p| {
                p.steps
                    .into_iter()
                    .map(|s| (s.person_id.0, s.relation))
                    .collect()
            })
    }

    #[test]
    fn test_neighbors_of_unknown_id_is_empty() {
        let lineage = small_family();
        let graph = KinshipGraph::new(&lineage);
        assert!(graph.neighbors(&"nobody".into()).is_empty());
    }

    #[test]
    fn test_spouse_edge_detected_from_either_direction() {
        // Only B points at A; both must still see each other as Spouse
        let lineage = small_family();
        let graph = KinshipGraph::new(&lineage);

        let a_edges = graph.neighbors(&"A".into());
        assert!(a_edges.contains(&("B".into(), KinRelation::Spouse)));

        let b_edges = graph.neighbors(&"B".into());
        assert!(b_edges.contains(&("A".into(), KinRelation::Spouse)));
    }

    #[test]
    fn test_spouse_edge_not_duplicated_when_symmetric() {
        let mut lineage = small_family();
        lineage.upsert(
            Person::new("Arun", "Verma", Gender::Male)
                .with_id("A")
                .with_spouse("B"),
        );

        let graph = KinshipGraph::new(&lineage);
        let spouse_edges: Vec<_> = graph
            .neighbors(&"A".into())
            .into_iter()
            .filter(|(_, r)| *r == KinRelation::Spouse)
            .collect();
        assert_eq!(spouse_edges, vec![("B".into(), KinRelation::Spouse)]);
    }

    #[test]
    fn test_child_edges_from_reverse_lookup() {
        let lineage = small_family();
        let graph = KinshipGraph::new(&lineage);

        assert!(graph
            .neighbors(&"A".into())
            .contains(&("C".into(), KinRelation::Child)));
        assert!(graph
            .neighbors(&"B".into())
            .contains(&("C".into(), KinRelation::Child)));
    }

    #[test]
    fn test_half_siblings_through_shared_mother_only() {
        let lineage = Lineage::from_people(vec![
            Person::new("Meera", "Rao", Gender::Female).with_id("M"),
            Person::new("Dev", "Rao", Gender::Male)
                .with_id("D")
                .with_mother("M")
                .with_father("F1"),
            Person::new("Esha", "Rao", Gender::Female)
                .with_id("E")
                .with_mother("M")
                .with_father("F2"),
            Person::new("Gopal", "Rao", Gender::Male).with_id("G"),
        ]);
        let graph = KinshipGraph::new(&lineage);

        assert!(graph
            .neighbors(&"D".into())
            .contains(&("E".into(), KinRelation::Sibling)));
        assert!(graph
            .neighbors(&"E".into())
            .contains(&("D".into(), KinRelation::Sibling)));
        // No shared parent with G in either direction
        assert!(!graph
            .neighbors(&"D".into())
            .iter()
            .any(|(id, _)| id == &"G".into()));
    }

    #[test]
    fn test_neighbor_reachable_through_two_relations_keeps_both() {
        // Malformed data: D is both the child of X and recorded as X's spouse
        let lineage = Lineage::from_people(vec![
            Person::new("Xavier", "Paul", Gender::Male)
                .with_id("X")
                .with_spouse("D"),
            Person::new("Dina", "Paul", Gender::Female)
                .with_id("D")
                .with_father("X"),
        ]);
        let graph = KinshipGraph::new(&lineage);

        let edges = graph.neighbors(&"X".into());
        assert!(edges.contains(&("D".into(), KinRelation::Spouse)));
        assert!(edges.contains(&("D".into(), KinRelation::Child)));
    }

    #[test]
    fn test_same_person_is_empty_path() {
        let lineage = small_family();
        for id in ["A", "B", "C"] {
            let path = path_of(&lineage, id, id).unwrap();
            assert!(path.is_empty());
        }
    }

    #[test]
    fn test_pinned_household_paths() {
        let lineage = small_family();

        assert_eq!(
            path_of(&lineage, "A", "C").unwrap(),
            vec![("C".to_string(), KinRelation::Child)]
        );
        assert_eq!(
            path_of(&lineage, "B", "C").unwrap(),
            vec![("C".to_string(), KinRelation::Child)]
        );
        assert_eq!(
            path_of(&lineage, "A", "B").unwrap(),
            vec![("B".to_string(), KinRelation::Spouse)]
        );
        // Father and Mother are enumerated before Spouse and Child, so the
        // one-hop Mother edge wins over C -> A -> B
        assert_eq!(
            path_of(&lineage, "C", "B").unwrap(),
            vec![("B".to_string(), KinRelation::Mother)]
        );
    }

    #[test]
    fn test_path_length_is_minimal() {
        // Grandfather chain plus a marriage shortcut:
        // G -(child)-> F -(child)-> S, and G's spouse GM
        let lineage = Lineage::from_people(vec![
            Person::new("Harish", "Sharma", Gender::Male).with_id("G"),
            Person::new("Gita", "Sharma", Gender::Female)
                .with_id("GM")
                .with_spouse("G"),
            Person::new("Deepak", "Sharma", Gender::Male)
                .with_id("F")
                .with_father("G"),
            Person::new("Sohan", "Sharma", Gender::Male)
                .with_id("S")
                .with_father("F"),
        ]);

        // S to G: exactly two hops (via F), not three via the spouse edge
        let path = path_of(&lineage, "S", "G").unwrap();
        assert_eq!(path.len(), 2);
        assert_eq!(
            path,
            vec![
                ("F".to_string(), KinRelation::Father),
                ("G".to_string(), KinRelation::Father),
            ]
        );

        // S to GM: three hops, grandmother by marriage
        let path = path_of(&lineage, "S", "GM").unwrap();
        assert_eq!(path.len(), 3);
    }

    #[test]
    fn test_unreachable_pair_is_none_not_empty() {
        let mut lineage = small_family();
        lineage.upsert(Person::new("Zara", "Khan", Gender::Female).with_id("Z"));

        assert!(path_of(&lineage, "A", "Z").is_none());
        assert!(path_of(&lineage, "Z", "A").is_none());
        // Distinct from the same-person case
        assert_eq!(path_of(&lineage, "Z", "Z").unwrap().len(), 0);
    }

    #[test]
    fn test_missing_endpoints_resolve_to_no_path() {
        let lineage = small_family();
        assert!(path_of(&lineage, "ghost", "A").is_none());
        assert!(path_of(&lineage, "A", "ghost").is_none());
        // Two missing but equal ids still count as "same person"
        assert!(path_of(&lineage, "ghost", "ghost").unwrap().is_empty());
    }

    #[test]
    fn test_repeated_queries_are_deterministic() {
        let lineage = small_family();
        let graph = KinshipGraph::new(&lineage);

        let first = graph.find_path(&"C".into(), &"B".into());
        for _ in 0..10 {
            assert_eq!(graph.find_path(&"C".into(), &"B".into()), first);
        }
    }

    #[test]
    fn test_terminates_on_cyclic_parentage() {
        // Malformed data: two records naming each other as father
        let lineage = Lineage::from_people(vec![
            Person::new("Ouro", "Boros", Gender::Male)
                .with_id("P")
                .with_father("Q"),
            Person::new("Boros", "Ouro", Gender::Male)
                .with_id("Q")
                .with_father("P"),
            Person::new("Lonely", "Node", Gender::Other).with_id("L"),
        ]);

        // Must terminate and report unreachable, not loop forever
        assert!(path_of(&lineage, "P", "L").is_none());
        assert_eq!(
            path_of(&lineage, "P", "Q").unwrap(),
            vec![("Q".to_string(), KinRelation::Father)]
        );
    }
}
