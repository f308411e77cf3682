// 调研阶段：Senior Research Analyst 借助网络搜索，针对主题、内容类型与读者产出调研简报
// 简报为自由文本（执行摘要 + 关键发现 + 数据 + 引用来源），通过任务图显式交给写作阶段

pub mod agents;
