//! 固定的两节点任务图：调研 → 写作

use anyhow::{Result, bail};
use std::collections::HashMap;
use std::fmt::Display;

/// 流水线阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Research,
    Writing,
}

impl Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let str = match self {
            Stage::Research => "Research",
            Stage::Writing => "Writing",
        };
        write!(f, "{}", str)
    }
}

/// 任务节点及其依赖
#[derive(Debug, Clone)]
pub struct TaskNode {
    pub stage: Stage,
    pub depends_on: Vec<Stage>,
}

/// 有向无环任务图，节点的输入为其依赖节点的输出
#[derive(Debug, Clone)]
pub struct TaskGraph {
    nodes: Vec<TaskNode>,
}

impl TaskGraph {
    pub fn new(nodes: Vec<TaskNode>) -> Self {
        Self { nodes }
    }

    /// 内容生成流水线：写作依赖调研
    pub fn content_pipeline() -> Self {
        Self::new(vec![
            TaskNode {
                stage: Stage::Research,
                depends_on: vec![],
            },
            TaskNode {
                stage: Stage::Writing,
                depends_on: vec![Stage::Research],
            },
        ])
    }

    pub fn dependencies(&self, stage: Stage) -> &[Stage] {
        self.nodes
            .iter()
            .find(|node| node.stage == stage)
            .map(|node| node.depends_on.as_slice())
            .unwrap_or(&[])
    }

    /// 拓扑排序，同层按声明顺序
    pub fn execution_order(&self) -> Result<Vec<Stage>> {
        let mut in_degree: HashMap<Stage, usize> = HashMap::new();
        for node in &self.nodes {
            if in_degree.insert(node.stage, node.depends_on.len()).is_some() {
                bail!("stage {} is declared twice", node.stage);
            }
        }
        for node in &self.nodes {
            for dep in &node.depends_on {
                if !in_degree.contains_key(dep) {
                    bail!("stage {} depends on unknown stage {}", node.stage, dep);
                }
            }
        }

        let mut order = Vec::with_capacity(self.nodes.len());
        while order.len() < self.nodes.len() {
            let ready = self
                .nodes
                .iter()
                .find(|node| !order.contains(&node.stage) && in_degree[&node.stage] == 0)
                .map(|node| node.stage);

            let Some(stage) = ready else {
                bail!("task graph contains a cycle");
            };

            order.push(stage);
            for node in &self.nodes {
                if node.depends_on.contains(&stage)
                    && let Some(degree) = in_degree.get_mut(&node.stage)
                {
                    *degree -= 1;
                }
            }
        }
        Ok(order)
    }

    /// 收集某个节点的上游输出
    pub fn upstream_input(&self, stage: Stage, outputs: &HashMap<Stage, String>) -> Option<String> {
        let parts: Vec<&str> = self
            .dependencies(stage)
            .iter()
            .filter_map(|dep| outputs.get(dep).map(String::as_str))
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join("\n\n"))
        }
    }

    /// 没有任何节点依赖的终止节点
    pub fn terminal(&self) -> Option<Stage> {
        self.nodes
            .iter()
            .rev()
            .find(|node| {
                !self
                    .nodes
                    .iter()
                    .any(|other| other.depends_on.contains(&node.stage))
            })
            .map(|node| node.stage)
    }
}
