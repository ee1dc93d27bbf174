pub mod sort;
pub mod topk;
