use crate::individual::Candidate;

/// The result of one selection call.
///
/// Holds the chosen positions in output order (possibly with repeats, for
/// strategies that select with replacement) and a mask telling, for every
/// individual of the input population, whether it was chosen at least once.
///
/// # Examples
///
/// ```
/// use genselect::selection::Selection;
///
/// let selection = Selection::from_chosen(vec![2, 0, 2], 4);
///
/// assert_eq!(selection.len(), 3);
/// assert_eq!(selection.selected_mask(), &[true, false, true, false]);
/// assert_eq!(selection.distinct_count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    chosen: Vec<usize>,
    selected: Vec<bool>,
}

impl Selection {
    /// Builds a selection over a population of `population_len` individuals.
    ///
    /// Positions outside the population are kept in `chosen` but never marked.
    pub fn from_chosen(chosen: Vec<usize>, population_len: usize) -> Self {
        let mut selected = vec![false; population_len];
        for &index in &chosen {
            if let Some(flag) = selected.get_mut(index) {
                *flag = true;
            }
        }
        Self { chosen, selected }
    }

    /// Chosen positions in output order.
    pub fn chosen(&self) -> &[usize] {
        &self.chosen
    }

    pub fn len(&self) -> usize {
        self.chosen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chosen.is_empty()
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.get(index).copied().unwrap_or(false)
    }

    /// One flag per input individual.
    pub fn selected_mask(&self) -> &[bool] {
        &self.selected
    }

    /// Number of distinct individuals chosen.
    pub fn distinct_count(&self) -> usize {
        self.selected.iter().filter(|&&flag| flag).count()
    }

    /// Clones the chosen individuals out of `individuals`, in output order.
    pub fn individuals<C: Clone>(&self, individuals: &[C]) -> Vec<C> {
        self.chosen
            .iter()
            .filter_map(|&index| individuals.get(index).cloned())
            .collect()
    }

    /// Writes the selected marker onto every individual.
    pub fn apply_marks<C: Candidate>(&self, individuals: &mut [C]) {
        for (index, individual) in individuals.iter_mut().enumerate() {
            individual.set_selected(self.is_selected(index));
        }
    }
}
