//! Orden topológico de nodos (Kahn). Entre nodos listos gana el de menor
//! índice en el schema, así el orden es determinista.

use std::collections::BTreeSet;

use crate::errors::GraphError;

/// `deps[i]` son los índices de los nodos que deben ir antes que `i`.
/// Devuelve los índices en orden de ejecución.
pub fn topological_order(names: &[String], deps: &[Vec<usize>]) -> Result<Vec<usize>, GraphError> {
    let n = names.len();
    let mut in_degree = vec![0usize; n];
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); n];
    for (i, ds) in deps.iter().enumerate() {
        for &d in ds {
            in_degree[i] += 1;
            dependents[d].push(i);
        }
    }

    let mut ready: BTreeSet<usize> = (0..n).filter(|&i| in_degree[i] == 0).collect();
    let mut order = Vec::with_capacity(n);
    while let Some(i) = ready.pop_first() {
        order.push(i);
        for &j in &dependents[i] {
            in_degree[j] -= 1;
            if in_degree[j] == 0 {
                ready.insert(j);
            }
        }
    }

    if order.len() < n {
        let stuck = (0..n).filter(|i| in_degree[*i] > 0).map(|i| names[i].clone()).collect();
        return Err(GraphError::Cycle(stuck));
    }
    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(n: &[&str]) -> Vec<String> {
        n.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn dependencies_come_first() {
        // tok depende de hf, hf depende de mitie; declarados al revés
        let order = topological_order(&names(&["tok", "hf", "mitie"]), &[vec![1], vec![2], vec![]]).unwrap();
        assert_eq!(order, vec![2, 1, 0]);
    }

    #[test]
    fn independent_nodes_keep_schema_order() {
        let order = topological_order(&names(&["a", "b", "c"]), &[vec![], vec![], vec![]]).unwrap();
        assert_eq!(order, vec![0, 1, 2]);
    }

    #[test]
    fn cycle_is_reported_with_node_names() {
        let err = topological_order(&names(&["a", "b", "c"]), &[vec![1], vec![0], vec![]]).unwrap_err();
        assert_eq!(err, GraphError::Cycle(names(&["a", "b"])));
    }
}
