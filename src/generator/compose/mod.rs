// 写作阶段：Content Writer 不绑定任何工具，只依据交接过来的调研简报写出最终内容

pub mod agents;
