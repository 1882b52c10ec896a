use crate::model::{PlanningInput, ShiftKind};
use good_lp::{variable, Expression, ProblemVariables, Variable};

/// Variables `x[w,d,s]` rangées dans un tableau dense (membre, jour, type).
pub(super) struct ShiftGrid {
    vars: Vec<Variable>,
    workers: usize,
    days: u32,
}

impl ShiftGrid {
    pub(super) fn allocate(problem: &mut ProblemVariables, input: &PlanningInput) -> Self {
        let workers = input.workers.len();
        let kinds = ShiftKind::ALL.len();
        let mut vars = Vec::with_capacity(workers * input.days as usize * kinds);
        for worker in &input.workers {
            for day in 1..=input.days {
                for kind in ShiftKind::ALL {
                    let name = format!("x[{},{},{}]", worker, day, kind.code());
                    vars.push(problem.add(variable().binary().name(name)));
                }
            }
        }
        Self {
            vars,
            workers,
            days: input.days,
        }
    }

    pub(super) fn workers(&self) -> usize {
        self.workers
    }

    pub(super) fn days(&self) -> u32 {
        self.days
    }

    /// `day` est 1-based.
    pub(super) fn x(&self, worker: usize, day: u32, kind: ShiftKind) -> Variable {
        debug_assert!(worker < self.workers && (1..=self.days).contains(&day));
        let kinds = ShiftKind::ALL.len();
        let idx = (worker * self.days as usize + (day - 1) as usize) * kinds + kind.index();
        self.vars[idx]
    }

    /// Somme des créneaux du membre ce jour-là (0 ou 1 une fois les contraintes posées).
    pub(super) fn work(&self, worker: usize, day: u32) -> Expression {
        ShiftKind::ALL
            .iter()
            .map(|&kind| self.x(worker, day, kind))
            .sum()
    }

    pub(super) fn no_shift(&self, worker: usize, day: u32) -> Expression {
        Expression::from(1.0) - self.work(worker, day)
    }

    /// Nombre de créneaux `kind` du membre sur tout l'horizon.
    pub(super) fn count(&self, worker: usize, kind: ShiftKind) -> Expression {
        (1..=self.days).map(|day| self.x(worker, day, kind)).sum()
    }

    pub(super) fn total(&self, worker: usize) -> Expression {
        (1..=self.days).map(|day| self.work(worker, day)).sum()
    }
}
