// ==========================================
// 饲料配方优化系统 - 线性规划求解器
// ==========================================
// 职责: LpSolver 接口 + minilp 单纯形法后端
// 红线: 求解是确定性的,不做重试
// ==========================================

use crate::engine::lp_model::{LpModel, RowSense};
use minilp::{ComparisonOp, LinearExpr, OptimizationDirection, Problem, Variable};

/// 全零系数行的可行性判定容差
const EMPTY_ROW_TOLERANCE: f64 = 1e-9;

// ==========================================
// SolveStatus - 求解状态
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub enum SolveStatus {
    Optimal { values: Vec<f64>, objective: f64 },
    Infeasible,
    Unbounded,
}

// ==========================================
// LpSolver Trait
// ==========================================
// 实现者: MinilpSolver
pub trait LpSolver: Send + Sync {
    /// 后端名称（用于日志）
    fn name(&self) -> &'static str;

    /// 求解最小化问题
    fn solve(&self, model: &LpModel) -> SolveStatus;
}

// ==========================================
// MinilpSolver - 稠密单纯形法后端
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct MinilpSolver;

impl LpSolver for MinilpSolver {
    fn name(&self) -> &'static str {
        "minilp"
    }

    fn solve(&self, model: &LpModel) -> SolveStatus {
        let mut problem = Problem::new(OptimizationDirection::Minimize);

        let vars: Vec<Variable> = model
            .costs()
            .iter()
            .zip(model.upper_bounds())
            .map(|(&cost, &upper)| problem.add_var(cost, (0.0, upper)))
            .collect();

        for row in model.rows() {
            let mut expr = LinearExpr::empty();
            let mut non_zero = 0usize;
            for (&var, &coef) in vars.iter().zip(model.coefficients(row)) {
                if coef != 0.0 {
                    expr.add(var, coef);
                    non_zero += 1;
                }
            }

            // 全零行: 左端恒为 0,直接判定
            if non_zero == 0 {
                if !empty_row_satisfied(row.sense, row.rhs) {
                    return SolveStatus::Infeasible;
                }
                continue;
            }

            let op = match row.sense {
                RowSense::Eq => ComparisonOp::Eq,
                RowSense::Ge => ComparisonOp::Ge,
                RowSense::Le => ComparisonOp::Le,
            };
            problem.add_constraint(expr, op, row.rhs);
        }

        match problem.solve() {
            Ok(solution) => SolveStatus::Optimal {
                values: vars.iter().map(|&v| solution[v]).collect(),
                objective: solution.objective(),
            },
            Err(err) => match err {
                minilp::Error::Unbounded => SolveStatus::Unbounded,
                _ => SolveStatus::Infeasible,
            },
        }
    }
}

fn empty_row_satisfied(sense: RowSense, rhs: f64) -> bool {
    match sense {
        RowSense::Eq => rhs.abs() <= EMPTY_ROW_TOLERANCE,
        RowSense::Ge => rhs <= EMPTY_ROW_TOLERANCE,
        RowSense::Le => rhs >= -EMPTY_ROW_TOLERANCE,
    }
}
